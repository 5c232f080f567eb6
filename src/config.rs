//! Canvas configuration: grid, wire/block visuals, and selection-box styling.
//!
//! These are the read-only constants the grid/theme collaborator supplies to
//! the core. Defaults reproduce the editor's stock look: a 75px grid with
//! 75x75 blocks and a 10x10 wire arrowhead.

use serde::{Deserialize, Serialize};

use crate::core::geometry::FlowDirection;

/// Grid settings consumed by snap-to-grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Snap cell size in canvas units. Snapping rounds each coordinate to
    /// the nearest multiple of this value.
    pub grid_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { grid_size: 75.0 }
    }
}

/// Visual constants for blocks and wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualConfig {
    pub arrow_width: f64,
    pub arrow_height: f64,
    pub stroke_width: f64,
    pub stroke_color: String,
    pub stroke_outline_width: f64,
    pub stroke_outline_color: String,
    pub block_width: f64,
    pub block_height: f64,
    /// Global wire flow policy. `Auto` picks the nearest face per
    /// connection; `Force` pins every wire to one face.
    pub flow_direction: FlowDirection,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            arrow_width: 10.0,
            arrow_height: 10.0,
            stroke_width: 3.0,
            stroke_color: "#ffffff".into(),
            stroke_outline_width: 1.0,
            stroke_outline_color: "rgba(0, 0, 0, 0.2)".into(),
            block_width: 75.0,
            block_height: 75.0,
            flow_direction: FlowDirection::Auto,
        }
    }
}

/// Styling for the rubber-band selection rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub border_radius: f64,
    pub border_width: f64,
    pub color: String,
    pub border_color: String,
    pub transparency: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            border_radius: 3.0,
            border_width: 1.0,
            color: "#2083fc".into(),
            border_color: "#1a6fd4".into(),
            transparency: 0.25,
        }
    }
}

/// Bundle of all canvas configuration, injected into the core at
/// construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub grid: GridConfig,
    pub visual: VisualConfig,
    pub selection: SelectionConfig,
}
