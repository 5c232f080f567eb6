//! Circuit Canvas - Connection and interaction core for the gate editor
//!
//! This crate provides the canvas-side logic for a block-and-wire circuit
//! editor: block placement with ghost drags, face-resolved bezier wires,
//! click pairing with toggle semantics, box selection, and grid snapping.
//! Rendering is delegated to a host through the [`Scene`] trait.

pub mod config;
pub mod core;
pub mod editor;
pub mod interaction;
pub mod manager;
pub mod scene;
pub mod wire;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use config::{CanvasConfig, GridConfig, SelectionConfig, VisualConfig};
pub use core::block::{Connectable, PlacedBlock};
pub use core::geometry::{resolve_attachment, Attachment, Face, FlowDirection, Point, Rect, Size};
pub use core::template::{BlockTemplate, TemplateRegistry};
pub use core::{BlockId, PairKey};
pub use editor::{CanvasEditor, EditorError};
pub use interaction::box_select::BoxSelect;
pub use interaction::drag::{DragCoordinator, DragOutcome, DragPhase};
pub use interaction::InteractionFlags;
pub use manager::{ClickOutcome, Connection, ConnectionManager, RejectReason};
pub use scene::{MemoryScene, RectVisual, Scene, SceneShape, SceneSnapshot, ShapeId};
pub use wire::{ArrowHead, WirePath};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
