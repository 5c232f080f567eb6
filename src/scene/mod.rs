//! Scene collaborator boundary.
//!
//! The core never draws; it describes rectangle and wire visuals and hands
//! them to a [`Scene`] implementation. Hosts back this with a real canvas
//! library; [`MemoryScene`] is a headless retained store used by the WASM
//! facade (the JS side reads the snapshot back and paints) and by tests.
//!
//! The re-render contract is remove-then-add: a moved wire is never diffed
//! in place, its old visual is removed and a fresh one added.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::geometry::Rect;
use crate::wire::WirePath;

/// Opaque handle to a visual in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// A rectangle visual: a block, its drag ghost, or the selection box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectVisual {
    pub rect: Rect,
    pub corner_radius: f64,
    pub fill: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub visible: bool,
    /// Selection highlight (glow/stroke) toggle.
    pub highlighted: bool,
}

/// Everything a scene retains per shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneShape {
    Rect(RectVisual),
    Wire(WirePath),
}

/// Narrow interface to the host's 2D renderer.
pub trait Scene {
    /// Add a rectangle visual; returns its handle.
    fn add_rect(&mut self, visual: RectVisual) -> ShapeId;

    /// Replace the stored visual for an existing rectangle. Unknown handles
    /// are ignored (the shape may have been removed mid-gesture).
    fn update_rect(&mut self, id: ShapeId, visual: RectVisual);

    /// Add a wire visual; returns its handle.
    fn add_wire(&mut self, path: WirePath) -> ShapeId;

    /// Remove a visual. Unknown handles are ignored.
    fn remove(&mut self, id: ShapeId);

    /// Flush pending visuals to the screen.
    fn batch_draw(&mut self);
}

/// Serializable dump of the whole scene, sorted by shape id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub shapes: Vec<(ShapeId, SceneShape)>,
}

/// Headless retained-mode scene.
#[derive(Debug, Default)]
pub struct MemoryScene {
    next_id: u64,
    shapes: HashMap<ShapeId, SceneShape>,
    draw_calls: u64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId(self.next_id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&SceneShape> {
        self.shapes.get(&id)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn wire_count(&self) -> usize {
        self.shapes
            .values()
            .filter(|s| matches!(s, SceneShape::Wire(_)))
            .count()
    }

    /// Number of `batch_draw` flushes issued so far.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let mut shapes: Vec<(ShapeId, SceneShape)> = self
            .shapes
            .iter()
            .map(|(id, shape)| (*id, shape.clone()))
            .collect();
        shapes.sort_by_key(|(id, _)| *id);
        SceneSnapshot { shapes }
    }
}

impl Scene for MemoryScene {
    fn add_rect(&mut self, visual: RectVisual) -> ShapeId {
        let id = self.allocate();
        self.shapes.insert(id, SceneShape::Rect(visual));
        id
    }

    fn update_rect(&mut self, id: ShapeId, visual: RectVisual) {
        if let Some(slot) = self.shapes.get_mut(&id) {
            *slot = SceneShape::Rect(visual);
        }
    }

    fn add_wire(&mut self, path: WirePath) -> ShapeId {
        let id = self.allocate();
        self.shapes.insert(id, SceneShape::Wire(path));
        id
    }

    fn remove(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }

    fn batch_draw(&mut self) {
        self.draw_calls += 1;
    }
}
