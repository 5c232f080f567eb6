//! Gesture coordination: shared interaction flags, the drag coordinator,
//! and the box-selection tool.
//!
//! The flags are advisory locks consulted at every gesture-start decision
//! point so that block dragging and box selection never engage
//! concurrently. They are an injected context object shared by handle, not
//! a process-wide singleton, so independent canvases stay independent.

pub mod box_select;
pub mod drag;

use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug)]
struct FlagState {
    hovering_over_block: bool,
    moving_block: bool,
    moving_block_selection: bool,
    selection_enabled: bool,
}

impl Default for FlagState {
    fn default() -> Self {
        Self {
            hovering_over_block: false,
            moving_block: false,
            moving_block_selection: false,
            selection_enabled: true,
        }
    }
}

/// Cloneable handle to the shared interaction state.
///
/// The core mutates these during gestures; excluded UI layers (cursor
/// skinning, settings panel) read and occasionally write them through a
/// cloned handle.
#[derive(Debug, Clone, Default)]
pub struct InteractionFlags {
    inner: Arc<RwLock<FlagState>>,
}

impl InteractionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovering_over_block(&self) -> bool {
        self.inner.read().hovering_over_block
    }

    pub fn set_hovering_over_block(&self, value: bool) {
        self.inner.write().hovering_over_block = value;
    }

    pub fn moving_block(&self) -> bool {
        self.inner.read().moving_block
    }

    pub fn set_moving_block(&self, value: bool) {
        self.inner.write().moving_block = value;
    }

    pub fn moving_block_selection(&self) -> bool {
        self.inner.read().moving_block_selection
    }

    pub fn set_moving_block_selection(&self, value: bool) {
        self.inner.write().moving_block_selection = value;
    }

    pub fn selection_enabled(&self) -> bool {
        self.inner.read().selection_enabled
    }

    pub fn set_selection_enabled(&self, value: bool) {
        self.inner.write().selection_enabled = value;
    }
}
