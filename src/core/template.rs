//! Block templates and the palette registry.
//!
//! Templates describe what a placed block looks like and how it behaves
//! (size, color, border, snap flag, connection capabilities). The registry
//! is the palette collaborator: the UI registers templates, the editor
//! instantiates blocks from them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Size;

fn default_true() -> bool {
    true
}

/// A reusable block definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTemplate {
    /// Palette identifier, e.g. `"AND"`.
    pub id: String,
    pub size: Size,
    pub color: String,
    pub border_radius: f64,
    pub border_width: f64,
    pub snap_to_grid: bool,
    /// Whether blocks from this template may originate a connection.
    #[serde(default = "default_true")]
    pub can_connect_out: bool,
    /// Whether blocks from this template may terminate a connection.
    #[serde(default = "default_true")]
    pub can_accept_in: bool,
}

impl BlockTemplate {
    /// A 75x75 rounded gate template with default capabilities.
    pub fn gate(id: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            size: Size::new(75.0, 75.0),
            color: color.to_string(),
            border_radius: 10.0,
            border_width: 0.0,
            snap_to_grid: true,
            can_connect_out: true,
            can_accept_in: true,
        }
    }
}

/// Thread-safe palette registry.
///
/// Uses `Arc<RwLock<HashMap>>` so UI and core can share one handle;
/// concurrent reads, exclusive writes.
#[derive(Clone, Default)]
pub struct TemplateRegistry {
    templates: Arc<RwLock<HashMap<String, BlockTemplate>>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template.
    ///
    /// Duplicate ids indicate a wiring bug in the caller and are rejected.
    pub fn register(&self, template: BlockTemplate) -> Result<(), TemplateError> {
        if template.id.is_empty() {
            return Err(TemplateError::EmptyId);
        }

        let mut templates = self.templates.write();
        if templates.contains_key(&template.id) {
            return Err(TemplateError::DuplicateTemplate(template.id));
        }
        templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Look up a template by id. Absence is a normal outcome.
    pub fn get(&self, id: &str) -> Option<BlockTemplate> {
        self.templates.read().get(id).cloned()
    }

    /// All registered templates, sorted by id for stable palette rendering.
    pub fn list(&self) -> Vec<BlockTemplate> {
        let mut all: Vec<BlockTemplate> = self.templates.read().values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.read().contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.templates.read().len()
    }

    pub fn clear(&self) {
        self.templates.write().clear();
    }

    /// Seed the stock logic-gate palette: AND, XOR, OR, and NOT.
    pub fn register_builtin_gates(&self) -> Result<(), TemplateError> {
        self.register(BlockTemplate::gate("AND", "#2083fc"))?;
        self.register(BlockTemplate::gate("XOR", "#8320fc"))?;
        self.register(BlockTemplate::gate("OR", "#7bed9a"))?;
        self.register(BlockTemplate::gate("NOT", "#ff6b81"))?;
        Ok(())
    }
}

/// Template registry errors.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("duplicate template id: {0}")]
    DuplicateTemplate(String),

    #[error("template id cannot be empty")]
    EmptyId,
}
