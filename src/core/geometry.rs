//! Geometry primitives and the face/anchor resolver.
//!
//! Blocks are axis-aligned rectangles. A connection attaches to one of the
//! four faces of the source block; the resolver picks the face whose midpoint
//! is closest to the target block's center, unless a global flow-direction
//! override is configured.

use serde::{Deserialize, Serialize};

/// A point on the canvas, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn left_mid(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    pub fn right_mid(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    pub fn top_mid(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    pub fn bottom_mid(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    /// Inclusive-boundary point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }

    /// Inclusive-boundary overlap test against another rectangle.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x + self.width >= other.x
            && self.x <= other.x + other.width
            && self.y + self.height >= other.y
            && self.y <= other.y + other.height
    }

    /// Builds the rectangle spanned by two arbitrary corner points,
    /// flipping the origin so width and height are never negative. Used by
    /// the box-selection tool, which must handle drags in all four quadrant
    /// directions.
    pub fn spanning(origin: Point, cursor: Point) -> Self {
        let (x, width) = if cursor.x < origin.x {
            (cursor.x, origin.x - cursor.x)
        } else {
            (origin.x, cursor.x - origin.x)
        };
        let (y, height) = if cursor.y < origin.y {
            (cursor.y, origin.y - cursor.y)
        } else {
            (origin.y, cursor.y - origin.y)
        };
        Self::new(x, y, width, height)
    }
}

/// The four attachment faces of a block, in resolver priority order.
///
/// The numeric values match the wire directions used by the renderer:
/// 1 = left, 2 = right, 3 = top, 4 = bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Left = 1,
    Right = 2,
    Top = 3,
    Bottom = 4,
}

impl Face {
    /// Numeric face identifier (1..=4).
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Global flow-direction policy.
///
/// `Auto` selects the nearest face; `Force` overrides nearest-face selection
/// for every connection on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowDirection {
    #[default]
    Auto,
    Force(Face),
}

/// Resolved endpoint geometry for a connection: the source anchor, the
/// target anchor on the opposite side, and the chosen face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub from: Point,
    pub to: Point,
    pub face: Face,
}

impl Attachment {
    /// Endpoint coordinates as a flat `[x1, y1, x2, y2]` array.
    pub fn coords(&self) -> [f64; 4] {
        [self.from.x, self.from.y, self.to.x, self.to.y]
    }
}

/// Computes the attachment geometry between two blocks.
///
/// The four candidate anchors on `a` (left/right/top/bottom midpoints) are
/// ranked by distance to `b`'s center; the closest wins. Ties resolve in
/// left, right, top, bottom order. A `FlowDirection::Force` override always
/// wins regardless of distance.
///
/// Total over all finite inputs. With NaN coordinates every distance
/// comparison is false, so the first candidate (left face) is returned as a
/// deterministic fallback; zero-size rectangles collapse all candidates onto
/// the same point and likewise resolve to the left face.
pub fn resolve_attachment(a: &Rect, b: &Rect, flow: FlowDirection) -> Attachment {
    let target = b.center();

    let candidates = [
        (Face::Left, a.left_mid()),
        (Face::Right, a.right_mid()),
        (Face::Top, a.top_mid()),
        (Face::Bottom, a.bottom_mid()),
    ];

    let mut face = candidates[0].0;
    let mut best = candidates[0].1.distance_to(target);
    for (f, anchor) in candidates.into_iter().skip(1) {
        let d = anchor.distance_to(target);
        if d < best {
            best = d;
            face = f;
        }
    }

    let face = match flow {
        FlowDirection::Auto => face,
        FlowDirection::Force(forced) => forced,
    };

    anchors_for(face, a, b)
}

/// Anchor pair for a given face: the source anchor on `a` and the matching
/// opposite-side anchor on `b`.
fn anchors_for(face: Face, a: &Rect, b: &Rect) -> Attachment {
    let (from, to) = match face {
        Face::Left => (a.left_mid(), b.right_mid()),
        Face::Right => (a.right_mid(), b.left_mid()),
        Face::Top => (a.top_mid(), b.bottom_mid()),
        Face::Bottom => (a.bottom_mid(), b.top_mid()),
    };
    Attachment { from, to, face }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_right_face_for_block_to_the_east() {
        let a = Rect::new(0.0, 0.0, 75.0, 75.0);
        let b = Rect::new(300.0, 0.0, 75.0, 75.0);

        let att = resolve_attachment(&a, &b, FlowDirection::Auto);
        assert_eq!(att.face, Face::Right);
        assert_eq!(att.coords(), [75.0, 37.5, 300.0, 37.5]);
    }

    #[test]
    fn resolves_bottom_face_for_block_to_the_south() {
        let a = Rect::new(0.0, 0.0, 75.0, 75.0);
        let b = Rect::new(0.0, 300.0, 75.0, 75.0);

        let att = resolve_attachment(&a, &b, FlowDirection::Auto);
        assert_eq!(att.face, Face::Bottom);
        assert_eq!(att.coords(), [37.5, 75.0, 37.5, 300.0]);
    }

    #[test]
    fn tie_breaks_in_left_right_top_bottom_order() {
        // Concentric rectangles: all four candidate distances are equal.
        let a = Rect::new(0.0, 0.0, 75.0, 75.0);
        let b = Rect::new(0.0, 0.0, 75.0, 75.0);

        let att = resolve_attachment(&a, &b, FlowDirection::Auto);
        assert_eq!(att.face, Face::Left);
    }

    #[test]
    fn forced_flow_overrides_nearest_face() {
        let a = Rect::new(0.0, 0.0, 75.0, 75.0);
        let b = Rect::new(300.0, 0.0, 75.0, 75.0);

        let att = resolve_attachment(&a, &b, FlowDirection::Force(Face::Top));
        assert_eq!(att.face, Face::Top);
        assert_eq!(att.coords(), [37.5, 0.0, 337.5, 75.0]);
    }

    #[test]
    fn nan_input_falls_back_to_left_face() {
        let a = Rect::new(f64::NAN, 0.0, 75.0, 75.0);
        let b = Rect::new(300.0, 0.0, 75.0, 75.0);

        let att = resolve_attachment(&a, &b, FlowDirection::Auto);
        assert_eq!(att.face, Face::Left);
    }

    #[test]
    fn zero_size_rect_resolves_deterministically() {
        let a = Rect::new(10.0, 10.0, 0.0, 0.0);
        let b = Rect::new(10.0, 10.0, 0.0, 0.0);

        let att = resolve_attachment(&a, &b, FlowDirection::Auto);
        assert_eq!(att.face, Face::Left);
        assert_eq!(att.coords(), [10.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn spanning_normalizes_all_quadrants() {
        let origin = Point::new(100.0, 100.0);

        let ne = Rect::spanning(origin, Point::new(150.0, 50.0));
        assert_eq!(ne, Rect::new(100.0, 50.0, 50.0, 50.0));

        let sw = Rect::spanning(origin, Point::new(40.0, 180.0));
        assert_eq!(sw, Rect::new(40.0, 100.0, 60.0, 80.0));

        let nw = Rect::spanning(origin, Point::new(60.0, 70.0));
        assert_eq!(nw, Rect::new(60.0, 70.0, 40.0, 30.0));
    }

    #[test]
    fn overlap_is_inclusive_on_shared_edges() {
        let a = Rect::new(0.0, 0.0, 75.0, 75.0);
        let b = Rect::new(75.0, 0.0, 75.0, 75.0);
        assert!(a.overlaps(&b));

        let c = Rect::new(75.1, 0.0, 75.0, 75.0);
        assert!(!a.overlaps(&c));
    }
}
