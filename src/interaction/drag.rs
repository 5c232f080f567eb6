//! Drag coordinator: the custom drag state machine for blocks and groups.
//!
//! The scene library's native dragging moves the real visual immediately;
//! this system instead drags a translucent ghost and only commits the
//! position on release. That decoupling is what makes group drags work and
//! keeps a plain click distinguishable from a drag: a press that never
//! moves is reported as a click for the pairing state machine.

use tracing::trace;

use crate::core::geometry::Point;
use crate::core::BlockId;
use crate::interaction::InteractionFlags;
use crate::manager::ConnectionManager;
use crate::scene::Scene;

/// Drag machine phases.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase {
    Idle,
    /// Pointer went down over a block; waiting to see movement. The press
    /// cursor is the grab point every member offset is measured from.
    Armed { block: BlockId, cursor: Point },
    /// Ghosts are live and tracking the cursor.
    Dragging { group: Vec<BlockId> },
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    None,
    /// Press and release with no movement: a plain click on the block.
    Click(BlockId),
    /// A completed drag; every member's position has been committed.
    Moved(Vec<BlockId>),
}

/// Per-canvas drag state machine.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    phase: DragPhase,
}

impl Default for DragPhase {
    fn default() -> Self {
        DragPhase::Idle
    }
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Pointer-down: arm on the hovered block, if any, remembering the
    /// press cursor as the grab point.
    pub fn pointer_down(&mut self, hovered: Option<BlockId>, cursor: Point) {
        if self.phase != DragPhase::Idle {
            return;
        }
        if let Some(block) = hovered {
            self.phase = DragPhase::Armed { block, cursor };
            trace!(block = %block, "drag armed");
        }
    }

    /// Pointer-move: the first move after arming starts the drag; while
    /// dragging, every move retranslates the whole group's ghosts.
    pub fn pointer_move(
        &mut self,
        cursor: Point,
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
        flags: &InteractionFlags,
    ) {
        match &self.phase {
            DragPhase::Idle => {}
            DragPhase::Armed { block, cursor: grab } => {
                let (block, grab) = (*block, *grab);
                let group = self.start_drag(block, grab, manager, scene, flags);
                Self::translate_ghosts(&group, cursor, manager, scene);
                self.phase = DragPhase::Dragging { group };
            }
            DragPhase::Dragging { group } => {
                let group = group.clone();
                Self::translate_ghosts(&group, cursor, manager, scene);
            }
        }
    }

    /// Move every member's ghost so the grab point stays under the cursor.
    fn translate_ghosts(
        group: &[BlockId],
        cursor: Point,
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
    ) {
        for id in group {
            if let Some(block) = manager.get_block_mut(*id) {
                let offset = block.drag_offset;
                block.set_ghost_position(Point::new(
                    cursor.x - offset.x,
                    cursor.y - offset.y,
                ));
            }
            manager.refresh_ghost_visual(*id, scene);
        }
        scene.batch_draw();
    }

    /// Pointer-up anywhere on the stage terminates the gesture.
    ///
    /// A drag commits every ghost position onto its block (with grid snap),
    /// clears group membership and selection, and fires moved
    /// notifications. An armed press that never moved is a click.
    pub fn pointer_up(
        &mut self,
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
        flags: &InteractionFlags,
    ) -> DragOutcome {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => DragOutcome::None,
            DragPhase::Armed { block, .. } => {
                trace!(block = %block, "press resolved as click");
                DragOutcome::Click(block)
            }
            DragPhase::Dragging { group } => {
                let grid = manager.config().grid.grid_size;
                for id in &group {
                    let Some(block) = manager.get_block_mut(*id) else {
                        continue;
                    };
                    block.set_position(block.ghost_position());
                    block.hide_ghost();
                    block.snap_position(grid);
                    block.clear_drag_group();
                    block.set_selected(false);

                    manager.refresh_block_visual(*id, scene);
                    manager.refresh_ghost_visual(*id, scene);
                    manager.notify_block_moved(*id, scene);
                }
                // A committed drag deselects its members; if one of them
                // was the pending pairing source, abandon the pairing too
                // so the machine is not left armed without a highlight.
                if let Some(pending) = manager.pending_source() {
                    if group.contains(&pending) {
                        manager.clear_selection(scene);
                    }
                }
                scene.batch_draw();

                flags.set_moving_block(false);
                flags.set_moving_block_selection(false);
                trace!(members = group.len(), "drag committed");
                DragOutcome::Moved(group)
            }
        }
    }

    /// First movement after arming: resolve the drag group, show ghosts,
    /// and capture per-member offsets from the press grab point.
    fn start_drag(
        &mut self,
        block: BlockId,
        grab: Point,
        manager: &mut ConnectionManager,
        scene: &mut dyn Scene,
        flags: &InteractionFlags,
    ) -> Vec<BlockId> {
        let group = manager
            .get_block(block)
            .map(|b| b.drag_group().to_vec())
            .unwrap_or_default();
        let group = if group.is_empty() { vec![block] } else { group };

        for id in &group {
            if let Some(member) = manager.get_block_mut(*id) {
                let position = member.position();
                member.drag_offset = Point::new(grab.x - position.x, grab.y - position.y);
                member.show_ghost();
            }
            manager.refresh_ghost_visual(*id, scene);
        }
        scene.batch_draw();

        flags.set_moving_block(true);
        if group.len() > 1 {
            flags.set_moving_block_selection(true);
        }
        trace!(members = group.len(), "drag started");
        group
    }
}
