//! Editor façade: one entry point for pointer events and block lifecycle.
//!
//! The editor wires the collaborators together and routes each pointer
//! event through them in a fixed order: cursor tracking, then the drag
//! coordinator, then the pairing state machine or box selection. Hosts
//! (native tests or the wasm bindings) only ever talk to this type.

use tracing::debug;

use crate::config::CanvasConfig;
use crate::core::block::PlacedBlock;
use crate::core::geometry::{Point, Rect};
use crate::core::template::{TemplateError, TemplateRegistry};
use crate::core::BlockId;
use crate::interaction::box_select::BoxSelect;
use crate::interaction::drag::{DragCoordinator, DragOutcome};
use crate::interaction::InteractionFlags;
use crate::manager::{ClickOutcome, ConnectionManager, ManagerError};
use crate::scene::{RectVisual, Scene};

/// Editor-level errors surfaced to hosts.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("unknown template id: {0:?}")]
    UnknownTemplate(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Manager(#[from] ManagerError),
}

/// The canvas editor. Generic over the scene so tests run against an
/// in-memory store and the browser build against a real renderer.
pub struct CanvasEditor<S: Scene> {
    scene: S,
    flags: InteractionFlags,
    templates: TemplateRegistry,
    manager: ConnectionManager,
    drag: DragCoordinator,
    box_select: BoxSelect,
    cursor: Point,
}

impl<S: Scene> CanvasEditor<S> {
    pub fn new(scene: S, config: CanvasConfig) -> Self {
        Self {
            scene,
            flags: InteractionFlags::default(),
            templates: TemplateRegistry::new(),
            manager: ConnectionManager::new(config),
            drag: DragCoordinator::new(),
            box_select: BoxSelect::new(),
            cursor: Point::default(),
        }
    }

    // ── Collaborator access ─────────────────────────────────────────────

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn flags(&self) -> &InteractionFlags {
        &self.flags
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    // ── Block lifecycle ─────────────────────────────────────────────────

    /// Place a new block from a registered template.
    ///
    /// The block gets a committed rectangle and a hidden ghost in the
    /// scene, snaps to the grid immediately if its template asks for it,
    /// and is registered with the connection manager.
    pub fn place_block(&mut self, template_id: &str, at: Point) -> Result<BlockId, EditorError> {
        let template = self
            .templates
            .get(template_id)
            .ok_or_else(|| EditorError::UnknownTemplate(template_id.to_string()))?;

        let id = BlockId::new();
        // Allocate both handles up front with an invisible placeholder; the
        // real visuals are pushed once the block exists to compute them.
        let placeholder = RectVisual {
            rect: Rect::from_parts(at, template.size),
            corner_radius: 0.0,
            fill: String::new(),
            stroke_width: 0.0,
            opacity: 0.0,
            visible: false,
            highlighted: false,
        };
        let shape = self.scene.add_rect(placeholder.clone());
        let ghost_shape = self.scene.add_rect(placeholder);

        let mut block = PlacedBlock::new(id, template, at, shape, ghost_shape);
        block.snap_position(self.manager.config().grid.grid_size);

        let visual = block.visual();
        let ghost_visual = block.ghost_visual();
        self.manager.add_block(block)?;

        self.scene.update_rect(shape, visual);
        self.scene.update_rect(ghost_shape, ghost_visual);
        self.scene.batch_draw();

        debug!(block = %id, template = template_id, "block placed");
        Ok(id)
    }

    /// Remove a block along with its wires and visuals.
    pub fn remove_block(&mut self, id: BlockId) -> Result<(), EditorError> {
        self.manager.remove_block(id, &mut self.scene)?;
        Ok(())
    }

    // ── Pointer events ──────────────────────────────────────────────────

    /// Pointer pressed at `cursor`.
    pub fn pointer_down(&mut self, cursor: Point) {
        self.cursor = cursor;
        let hovered = self.manager.block_at(cursor);
        self.flags.set_hovering_over_block(hovered.is_some());

        self.drag.pointer_down(hovered, cursor);
        if hovered.is_none() {
            // Empty-canvas press abandons any pending pairing source.
            self.manager.clear_selection(&mut self.scene);
        }

        let style = self.manager.config().selection.clone();
        self.box_select
            .pointer_down(cursor, &mut self.manager, &mut self.scene, &self.flags, &style);
    }

    /// Pointer moved to `cursor`.
    pub fn pointer_move(&mut self, cursor: Point) {
        self.cursor = cursor;
        let hovered = self.manager.block_at(cursor);
        self.flags.set_hovering_over_block(hovered.is_some());

        self.drag
            .pointer_move(cursor, &mut self.manager, &mut self.scene, &self.flags);

        let style = self.manager.config().selection.clone();
        self.box_select.pointer_move(cursor, &mut self.scene, &style);
    }

    /// Pointer released.
    ///
    /// A press-and-release with no movement is a click and feeds the
    /// pairing state machine; a completed drag commits positions and
    /// dissolves any box selection that drove it.
    pub fn pointer_up(&mut self) -> Option<ClickOutcome> {
        let outcome = self
            .drag
            .pointer_up(&mut self.manager, &mut self.scene, &self.flags);

        let click = match outcome {
            DragOutcome::Click(id) => Some(self.manager.on_block_clicked(id, &mut self.scene)),
            DragOutcome::Moved(_) => {
                self.box_select.reset();
                None
            }
            DragOutcome::None => None,
        };

        self.box_select
            .pointer_up(self.cursor, &mut self.manager, &mut self.scene);
        click
    }

    // ── Bulk operations ─────────────────────────────────────────────────

    /// Align every block to the grid. See
    /// [`ConnectionManager::snap_all_to_grid`].
    pub fn snap_all_to_grid(&mut self, force: bool) {
        self.manager.snap_all_to_grid(force, &mut self.scene);
    }

    /// Enable or disable the box-selection tool.
    pub fn set_selection_enabled(&mut self, enabled: bool) {
        self.flags.set_selection_enabled(enabled);
    }
}
