//! Rubber-band box selection.
//!
//! A windows-style drag rectangle: press on empty canvas, drag out a region
//! in any direction, release to select every block it touches. The
//! resolved blocks become one shared drag group, so the next block drag
//! moves them all rigidly. Gesture starts are gated on the shared
//! interaction flags so box selection never fights a block drag.

use tracing::{debug, trace};

use crate::config::SelectionConfig;
use crate::core::geometry::{Point, Rect};
use crate::core::BlockId;
use crate::interaction::InteractionFlags;
use crate::manager::ConnectionManager;
use crate::scene::{RectVisual, Scene, ShapeId};

/// Selection machine phases.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectPhase {
    Idle,
    /// Rubber band visible, tracking the cursor.
    Dragging { origin: Point, shape: ShapeId },
    /// A selection is live; its members share a drag group.
    Resolved { selected: Vec<BlockId> },
}

impl Default for SelectPhase {
    fn default() -> Self {
        SelectPhase::Idle
    }
}

/// Per-canvas box-selection state machine.
#[derive(Debug, Default)]
pub struct BoxSelect {
    phase: SelectPhase,
}

impl BoxSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SelectPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SelectPhase::Dragging { .. })
    }

    /// Blocks held by a resolved selection, if any.
    pub fn resolved_selection(&self) -> Option<&[BlockId]> {
        match &self.phase {
            SelectPhase::Resolved { selected } => Some(selected),
            _ => None,
        }
    }

    /// Pointer-down on the stage.
    ///
    /// An existing resolved selection is cleared first (empty-canvas click
    /// deselects). A new rubber band only starts when the pointer is not
    /// over a block, no group is mid-move, and selection is enabled.
    pub fn pointer_down(
        &mut self,
        cursor: Point,
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
        flags: &InteractionFlags,
        style: &SelectionConfig,
    ) {
        if let SelectPhase::Resolved { selected } = &self.phase {
            // A press on a member block keeps the selection so the drag
            // coordinator can move the whole group.
            if flags.hovering_over_block() {
                return;
            }
            let selected = selected.clone();
            self.phase = SelectPhase::Idle;
            Self::clear_resolved(&selected, manager, scene);
        }

        if flags.hovering_over_block()
            || flags.moving_block()
            || flags.moving_block_selection()
            || !flags.selection_enabled()
            || self.is_dragging()
        {
            return;
        }

        let shape = scene.add_rect(Self::band_visual(
            Rect::new(cursor.x, cursor.y, 0.0, 0.0),
            style,
        ));
        scene.batch_draw();
        self.phase = SelectPhase::Dragging {
            origin: cursor,
            shape,
        };
        trace!(x = cursor.x, y = cursor.y, "box selection started");
    }

    /// Pointer-move: stretch the rubber band toward the cursor, flipping
    /// the origin corner for negative spans.
    pub fn pointer_move(
        &mut self,
        cursor: Point,
        scene: &mut dyn Scene,
        style: &SelectionConfig,
    ) {
        if let SelectPhase::Dragging { origin, shape } = self.phase {
            let rect = Rect::spanning(origin, cursor);
            scene.update_rect(shape, Self::band_visual(rect, style));
            scene.batch_draw();
        }
    }

    /// Pointer-up: resolve the rectangle into a selection.
    ///
    /// No hits resets silently; otherwise every hit block is highlighted
    /// and all of them share one drag group.
    pub fn pointer_up(
        &mut self,
        cursor: Point,
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
    ) {
        let SelectPhase::Dragging { origin, shape } = self.phase else {
            return;
        };

        scene.remove(shape);
        scene.batch_draw();

        let region = Rect::spanning(origin, cursor);
        let hits = manager.find_in_rect(region);
        if hits.is_empty() {
            self.phase = SelectPhase::Idle;
            return;
        }

        for id in &hits {
            manager.set_block_selected(*id, true, scene);
            if let Some(block) = manager.get_block_mut(*id) {
                block.set_drag_group(hits.clone());
            }
        }
        scene.batch_draw();

        debug!(members = hits.len(), "box selection resolved");
        self.phase = SelectPhase::Resolved { selected: hits };
    }

    /// Forget a resolved selection after its group drag committed (the
    /// drag coordinator already cleared per-block state).
    pub(crate) fn reset(&mut self) {
        self.phase = SelectPhase::Idle;
    }

    fn clear_resolved(
        selected: &[BlockId],
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
    ) {
        for id in selected {
            manager.set_block_selected(*id, false, scene);
            if let Some(block) = manager.get_block_mut(*id) {
                block.clear_drag_group();
            }
        }
        scene.batch_draw();
        trace!(members = selected.len(), "box selection cleared");
    }

    fn band_visual(rect: Rect, style: &SelectionConfig) -> RectVisual {
        RectVisual {
            rect,
            corner_radius: style.border_radius,
            fill: style.color.clone(),
            stroke_width: style.border_width,
            opacity: style.transparency,
            visible: true,
            highlighted: false,
        }
    }
}
