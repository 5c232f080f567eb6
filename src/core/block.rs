//! Placed blocks: the draggable, connectable entities on the canvas.
//!
//! A block owns two scene visuals: the committed rectangle and a translucent
//! "ghost" that tracks the cursor during a drag. The real rectangle only
//! moves when the drag commits, which is what makes group drags and
//! decoupled previews possible.

use crate::core::geometry::{Point, Rect, Size};
use crate::core::template::BlockTemplate;
use crate::core::{BlockId, PairKey};
use crate::scene::{RectVisual, ShapeId};

/// Ghost overlay opacity relative to the committed block.
const GHOST_OPACITY: f64 = 0.5;

/// Anything the connection layer can wire up.
pub trait Connectable {
    fn id(&self) -> BlockId;
    fn bounds(&self) -> Rect;

    /// May this entity originate a connection?
    fn can_connect_out(&self) -> bool {
        true
    }

    /// May this entity terminate a connection?
    fn can_accept_in(&self) -> bool {
        true
    }
}

/// A block placed on the canvas.
#[derive(Debug, Clone)]
pub struct PlacedBlock {
    id: BlockId,
    template: BlockTemplate,
    position: Point,
    snap_to_grid: bool,
    selected: bool,

    /// Committed visual handle.
    pub(crate) shape: ShapeId,
    /// Ghost visual handle.
    pub(crate) ghost_shape: ShapeId,
    ghost_position: Point,
    ghost_visible: bool,

    /// Pointer-to-block offset captured at drag start.
    pub(crate) drag_offset: Point,
    /// Blocks co-moving with this one; empty when not in a group drag.
    pub(crate) drag_group: Vec<BlockId>,
    /// Connections to re-render when this block moves. Maintained by the
    /// connection manager; entries are removed deterministically on
    /// disconnect and on block destruction.
    pub(crate) moved_subscribers: Vec<PairKey>,
}

impl PlacedBlock {
    pub fn new(
        id: BlockId,
        template: BlockTemplate,
        position: Point,
        shape: ShapeId,
        ghost_shape: ShapeId,
    ) -> Self {
        let snap_to_grid = template.snap_to_grid;
        Self {
            id,
            template,
            position,
            snap_to_grid,
            selected: false,
            shape,
            ghost_shape,
            ghost_position: position,
            ghost_visible: false,
            drag_offset: Point::default(),
            drag_group: Vec::new(),
            moved_subscribers: Vec::new(),
        }
    }

    pub fn template(&self) -> &BlockTemplate {
        &self.template
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.template.size
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_to_grid
    }

    /// Enable snapping permanently (used by force-align operations).
    pub(crate) fn enable_snap(&mut self) {
        self.snap_to_grid = true;
    }

    /// Snap the committed position to the grid if this block opted in.
    /// Returns true when the position changed.
    pub(crate) fn snap_position(&mut self, grid_size: f64) -> bool {
        if !self.snap_to_grid {
            return false;
        }
        let snapped = Point::new(
            snap_coord(self.position.x, grid_size),
            snap_coord(self.position.y, grid_size),
        );
        if snapped == self.position {
            return false;
        }
        self.position = snapped;
        true
    }

    pub fn drag_group(&self) -> &[BlockId] {
        &self.drag_group
    }

    pub(crate) fn set_drag_group(&mut self, group: Vec<BlockId>) {
        self.drag_group = group;
    }

    pub(crate) fn clear_drag_group(&mut self) {
        self.drag_group.clear();
    }

    // ── Ghost ───────────────────────────────────────────────────────────

    pub fn ghost_visible(&self) -> bool {
        self.ghost_visible
    }

    pub fn ghost_position(&self) -> Point {
        self.ghost_position
    }

    /// Show the ghost at the committed position.
    pub(crate) fn show_ghost(&mut self) {
        self.ghost_position = self.position;
        self.ghost_visible = true;
    }

    pub(crate) fn hide_ghost(&mut self) {
        self.ghost_visible = false;
    }

    pub(crate) fn set_ghost_position(&mut self, position: Point) {
        self.ghost_position = position;
    }

    // ── Visuals ─────────────────────────────────────────────────────────

    /// Visual description of the committed rectangle.
    pub fn visual(&self) -> RectVisual {
        RectVisual {
            rect: Rect::from_parts(self.position, self.template.size),
            corner_radius: self.template.border_radius,
            fill: self.template.color.clone(),
            stroke_width: self.template.border_width,
            opacity: 1.0,
            visible: true,
            highlighted: self.selected,
        }
    }

    /// Visual description of the ghost rectangle.
    pub fn ghost_visual(&self) -> RectVisual {
        RectVisual {
            rect: Rect::from_parts(self.ghost_position, self.template.size),
            corner_radius: self.template.border_radius,
            fill: self.template.color.clone(),
            stroke_width: self.template.border_width,
            opacity: GHOST_OPACITY,
            visible: self.ghost_visible,
            highlighted: false,
        }
    }
}

impl Connectable for PlacedBlock {
    fn id(&self) -> BlockId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.template.size)
    }

    fn can_connect_out(&self) -> bool {
        self.template.can_connect_out
    }

    fn can_accept_in(&self) -> bool {
        self.template.can_accept_in
    }
}

/// Round a coordinate to the nearest grid multiple. A non-positive grid
/// size leaves the coordinate untouched.
pub fn snap_coord(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}
