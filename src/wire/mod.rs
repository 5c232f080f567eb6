//! Wire visuals: cubic bezier path plus an arrowhead at the target anchor.
//!
//! Construction is pure; the scene collaborator is responsible for actually
//! painting the path. Re-rendering a moved wire means constructing a fresh
//! `WirePath` from live geometry and replacing the old visual.

use serde::{Deserialize, Serialize};

use crate::config::VisualConfig;
use crate::core::geometry::{Attachment, Face, Point};

/// Arrowhead segment: `tail -> tip`, with the tip touching the target
/// anchor and the tail inset along the approach axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    pub tail: Point,
    pub tip: Point,
    pub pointer_width: f64,
    pub pointer_height: f64,
}

/// Renderable wire description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePath {
    /// Cubic bezier control points: start, two midpoints, end.
    pub curve: [Point; 4],
    pub arrow: ArrowHead,
    pub face: Face,
    /// True while a connection gesture involves one of the endpoints; the
    /// wire is recolored with the endpoint's own color.
    pub selected: bool,
    pub color: String,
    pub stroke_width: f64,
    pub outline_width: f64,
    pub outline_color: String,
}

impl WirePath {
    /// Build the wire for an attachment.
    ///
    /// For horizontal faces (left/right) the control points bow along the
    /// x axis; for vertical faces (top/bottom) along the y axis.
    /// `highlight_color` is used when `selected` is set, otherwise the
    /// themed stroke color applies.
    pub fn construct(
        attachment: &Attachment,
        selected: bool,
        highlight_color: &str,
        visual: &VisualConfig,
    ) -> Self {
        let [x1, y1, x2, y2] = attachment.coords();

        let curve = match attachment.face {
            Face::Left | Face::Right => [
                Point::new(x1, y1),
                Point::new(x1 + (x2 - x1) / 2.0, y1),
                Point::new(x2 + (x1 - x2) / 2.0, y2),
                Point::new(x2, y2),
            ],
            Face::Top | Face::Bottom => [
                Point::new(x1, y1),
                Point::new(x1, y1 + (y2 - y1) / 2.0),
                Point::new(x2, y2 - (y2 - y1) / 2.0),
                Point::new(x2, y2),
            ],
        };

        Self {
            curve,
            arrow: Self::arrow_at(Point::new(x2, y2), attachment.face, visual),
            face: attachment.face,
            selected,
            color: if selected {
                highlight_color.to_string()
            } else {
                visual.stroke_color.clone()
            },
            stroke_width: visual.stroke_width,
            outline_width: visual.stroke_outline_width,
            outline_color: visual.stroke_outline_color.clone(),
        }
    }

    /// Arrowhead at the target anchor, inset by the arrow dimensions so the
    /// pointer tip meets the block face instead of overshooting it.
    fn arrow_at(end: Point, face: Face, visual: &VisualConfig) -> ArrowHead {
        let (aw, ah) = (visual.arrow_width, visual.arrow_height);

        let (tail, tip) = match face {
            Face::Left => {
                let x = end.x + aw;
                (Point::new(x, end.y), Point::new(x - aw, end.y))
            }
            Face::Right => {
                let x = end.x - aw;
                (Point::new(x, end.y), Point::new(x + aw, end.y))
            }
            Face::Top => {
                let y = end.y + ah;
                (Point::new(end.x, y), Point::new(end.x, y - ah))
            }
            Face::Bottom => {
                let y = end.y - ah;
                (Point::new(end.x, y), Point::new(end.x, y + ah))
            }
        };

        ArrowHead {
            tail,
            tip,
            pointer_width: aw,
            pointer_height: ah,
        }
    }
}
