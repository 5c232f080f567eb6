//! Connection manager: block registry, connection set, and the click
//! pairing state machine.
//!
//! The manager owns every placed block and every wire between them. It
//! supports:
//! - Block registration and removal (removal cleans all incident wires)
//! - Click pairing with toggle semantics: clicking source then target
//!   connects them, clicking an already-connected pair disconnects
//! - Redraw-on-move through per-block subscription lists
//! - Spatial queries for the box-selection tool
//! - Grid alignment across all blocks

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::config::CanvasConfig;
use crate::core::block::{Connectable, PlacedBlock};
use crate::core::geometry::{resolve_attachment, Attachment, Face, Point, Rect};
use crate::core::{BlockId, PairKey};
use crate::scene::{Scene, ShapeId};
use crate::wire::WirePath;

/// A live wire between two blocks.
///
/// Anchor geometry is cached for inspection but always recomputed from the
/// endpoints' live positions when either one moves.
#[derive(Debug, Clone)]
pub struct Connection {
    pub key: PairKey,
    pub face: Face,
    pub attachment: Attachment,
    pub selected: bool,
    pub(crate) wire_shape: ShapeId,
}

/// Result of feeding a block click into the pairing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click: the block is now the pending source.
    SourceSelected(BlockId),
    /// Second click completed a new connection.
    Connected(PairKey),
    /// Second click toggled an existing connection off.
    Disconnected(PairKey),
    /// Second click was invalid; the pending selection was cleared.
    Rejected(RejectReason),
    /// The clicked block is not registered (e.g. removed mid-gesture).
    UnknownBlock,
}

/// Expected, recoverable reasons a pairing attempt is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    SelfConnection,
    CapabilityDenied,
}

/// Registry-level errors. These indicate caller bugs, not user gestures.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("duplicate block id: {0}")]
    DuplicateBlock(BlockId),
}

/// Owns the block registry and the connection map.
pub struct ConnectionManager {
    config: CanvasConfig,
    blocks: HashMap<BlockId, PlacedBlock>,
    /// Insertion order; later blocks render on top and win hit-tests.
    order: Vec<BlockId>,
    connections: HashMap<PairKey, Connection>,
    /// Pending source block awaiting a second click.
    pending_source: Option<BlockId>,
}

impl ConnectionManager {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            blocks: HashMap::new(),
            order: Vec::new(),
            connections: HashMap::new(),
            pending_source: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ── Registry ────────────────────────────────────────────────────────

    /// Register a block. Duplicate registration is a caller bug.
    pub fn add_block(&mut self, block: PlacedBlock) -> Result<(), ManagerError> {
        let id = block.id();
        if self.blocks.contains_key(&id) {
            return Err(ManagerError::DuplicateBlock(id));
        }
        self.order.push(id);
        self.blocks.insert(id, block);
        trace!(block = %id, "block registered");
        Ok(())
    }

    /// Remove a block, its visuals, and every incident connection.
    pub fn remove_block(
        &mut self,
        id: BlockId,
        scene: &mut dyn Scene,
    ) -> Result<(), ManagerError> {
        if !self.blocks.contains_key(&id) {
            return Err(ManagerError::BlockNotFound(id));
        }

        // Tear down incident connections first so no dangling entries or
        // stale subscriptions survive the block.
        let incident: Vec<PairKey> = self
            .connections
            .keys()
            .filter(|key| key.touches(id))
            .copied()
            .collect();
        for key in incident {
            self.disconnect(key, scene);
        }

        if self.pending_source == Some(id) {
            self.pending_source = None;
        }

        let block = self.blocks.remove(&id).expect("presence checked above");
        self.order.retain(|entry| *entry != id);
        scene.remove(block.shape);
        scene.remove(block.ghost_shape);
        scene.batch_draw();

        debug!(block = %id, "block removed");
        Ok(())
    }

    /// Direct lookup; absence is a normal outcome.
    pub fn get_block(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.blocks.get(&id)
    }

    pub(crate) fn get_block_mut(&mut self, id: BlockId) -> Option<&mut PlacedBlock> {
        self.blocks.get_mut(&id)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Registered blocks in placement order.
    pub fn blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.order.iter().filter_map(|id| self.blocks.get(id))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn get_connection(&self, key: PairKey) -> Option<&Connection> {
        self.connections.get(&key)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Whether the two blocks are wired in either direction.
    pub fn is_connected(&self, a: BlockId, b: BlockId) -> bool {
        let key = PairKey::new(a, b);
        self.connections.contains_key(&key) || self.connections.contains_key(&key.reversed())
    }

    // ── Click pairing state machine ─────────────────────────────────────

    pub fn pending_source(&self) -> Option<BlockId> {
        self.pending_source
    }

    /// Clear any pending source, deselecting its visual. No side effects
    /// beyond the highlight.
    pub fn clear_selection(&mut self, scene: &mut dyn Scene) {
        if let Some(id) = self.pending_source.take() {
            self.set_block_selected(id, false, scene);
        }
    }

    /// Feed a block click into the pairing state machine.
    ///
    /// Idle: the block becomes the pending source. With a source pending:
    /// self-clicks and capability violations silently abort, an existing
    /// connection (either direction) toggles off, anything else creates a
    /// new wire. Every second click returns the machine to idle.
    pub fn on_block_clicked(&mut self, id: BlockId, scene: &mut dyn Scene) -> ClickOutcome {
        if !self.blocks.contains_key(&id) {
            return ClickOutcome::UnknownBlock;
        }

        let source = match self.pending_source {
            None => {
                self.pending_source = Some(id);
                self.set_block_selected(id, true, scene);
                trace!(block = %id, "pairing source selected");
                return ClickOutcome::SourceSelected(id);
            }
            Some(source) => source,
        };

        if source == id {
            self.clear_selection(scene);
            trace!(block = %id, "self-connection rejected");
            return ClickOutcome::Rejected(RejectReason::SelfConnection);
        }

        let allowed = {
            let from = &self.blocks[&source];
            let to = &self.blocks[&id];
            from.can_connect_out() && to.can_accept_in()
        };
        if !allowed {
            self.clear_selection(scene);
            trace!(from = %source, to = %id, "capability denied");
            return ClickOutcome::Rejected(RejectReason::CapabilityDenied);
        }

        let key = PairKey::new(source, id);
        for existing in [key, key.reversed()] {
            if self.connections.contains_key(&existing) {
                self.disconnect(existing, scene);
                self.clear_selection(scene);
                debug!(pair = %existing, "connection toggled off");
                return ClickOutcome::Disconnected(existing);
            }
        }

        self.connect(key, scene);
        self.clear_selection(scene);
        debug!(pair = %key, "connection created");
        ClickOutcome::Connected(key)
    }

    /// Create the wire for `key` and subscribe both endpoints to it.
    fn connect(&mut self, key: PairKey, scene: &mut dyn Scene) {
        let attachment = self.attachment_for(key);
        let color = self.blocks[&key.from].template().color.clone();
        let path = WirePath::construct(&attachment, false, &color, &self.config.visual);
        let wire_shape = scene.add_wire(path);
        scene.batch_draw();

        self.connections.insert(
            key,
            Connection {
                key,
                face: attachment.face,
                attachment,
                selected: false,
                wire_shape,
            },
        );

        for endpoint in [key.from, key.to] {
            if let Some(block) = self.blocks.get_mut(&endpoint) {
                block.moved_subscribers.push(key);
            }
        }
    }

    /// Remove the wire for `key`, unsubscribing both endpoints.
    pub(crate) fn disconnect(&mut self, key: PairKey, scene: &mut dyn Scene) -> bool {
        let Some(connection) = self.connections.remove(&key) else {
            return false;
        };
        scene.remove(connection.wire_shape);
        scene.batch_draw();

        for endpoint in [key.from, key.to] {
            if let Some(block) = self.blocks.get_mut(&endpoint) {
                block.moved_subscribers.retain(|entry| *entry != key);
            }
        }
        true
    }

    // ── Redraw on move ──────────────────────────────────────────────────

    /// Re-render every wire subscribed to `id`.
    ///
    /// Geometry is recomputed from the endpoints' live positions at call
    /// time; nothing is memoized across frames. A wire renders highlighted
    /// while either of its endpoints is the pending source.
    pub fn notify_block_moved(&mut self, id: BlockId, scene: &mut dyn Scene) {
        let subscribed: Vec<PairKey> = match self.blocks.get(&id) {
            Some(block) => block.moved_subscribers.clone(),
            None => return,
        };
        if subscribed.is_empty() {
            return;
        }

        for key in subscribed {
            if !self.connections.contains_key(&key) {
                continue;
            }
            let attachment = self.attachment_for(key);
            let selected = self.pending_source == Some(key.from)
                || self.pending_source == Some(key.to);
            let color = self.blocks[&key.from].template().color.clone();
            let path = WirePath::construct(&attachment, selected, &color, &self.config.visual);

            let connection = self
                .connections
                .get_mut(&key)
                .expect("presence checked above");
            scene.remove(connection.wire_shape);
            connection.wire_shape = scene.add_wire(path);
            connection.attachment = attachment;
            connection.face = attachment.face;
            connection.selected = selected;
        }
        scene.batch_draw();
    }

    fn attachment_for(&self, key: PairKey) -> Attachment {
        let from = self.blocks[&key.from].bounds();
        let to = self.blocks[&key.to].bounds();
        resolve_attachment(&from, &to, self.config.visual.flow_direction)
    }

    // ── Spatial queries ─────────────────────────────────────────────────

    /// All blocks whose bounds overlap `rect` (inclusive boundaries), in
    /// placement order. Linear in the number of registered blocks.
    pub fn find_in_rect(&self, rect: Rect) -> Vec<BlockId> {
        self.blocks()
            .filter(|block| block.bounds().overlaps(&rect))
            .map(|block| block.id())
            .collect()
    }

    /// Topmost block under `point`, if any.
    pub fn block_at(&self, point: Point) -> Option<BlockId> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.blocks.get(id))
            .find(|block| block.bounds().contains(point))
            .map(|block| block.id())
    }

    // ── Bulk operations ─────────────────────────────────────────────────

    /// Snap every block to the grid. With `force`, blocks that opted out
    /// of snapping are opted back in and snapped anyway.
    pub fn snap_all_to_grid(&mut self, force: bool, scene: &mut dyn Scene) {
        let grid = self.config.grid.grid_size;
        let ids: Vec<BlockId> = self.order.clone();
        for id in ids {
            let moved = {
                let block = self.blocks.get_mut(&id).expect("order tracks registry");
                if force {
                    block.enable_snap();
                }
                block.snap_position(grid)
            };
            if moved {
                self.refresh_block_visual(id, scene);
                self.notify_block_moved(id, scene);
            }
        }
        scene.batch_draw();
    }

    // ── Visual state ────────────────────────────────────────────────────

    /// Toggle a block's selection highlight and push the visual change.
    pub(crate) fn set_block_selected(
        &mut self,
        id: BlockId,
        selected: bool,
        scene: &mut dyn Scene,
    ) {
        if let Some(block) = self.blocks.get_mut(&id) {
            block.set_selected(selected);
            let visual = block.visual();
            let shape = block.shape;
            scene.update_rect(shape, visual);
        }
    }

    /// Push the committed rectangle's current state to the scene.
    pub(crate) fn refresh_block_visual(&mut self, id: BlockId, scene: &mut dyn Scene) {
        if let Some(block) = self.blocks.get(&id) {
            scene.update_rect(block.shape, block.visual());
        }
    }

    /// Push the ghost rectangle's current state to the scene.
    pub(crate) fn refresh_ghost_visual(&mut self, id: BlockId, scene: &mut dyn Scene) {
        if let Some(block) = self.blocks.get(&id) {
            scene.update_rect(block.ghost_shape, block.ghost_visual());
        }
    }
}
