//! Core identifiers, geometry, blocks, and the template palette.

pub mod block;
pub mod geometry;
pub mod template;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a placed block.
///
/// A random 128-bit UUID (v4); collisions are negligible for any session
/// size. Identifiers are stable for the lifetime of the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID.
    pub fn new() -> Self {
        BlockId(Uuid::new_v4())
    }

    /// Parse an ID from its canonical hyphenated form.
    ///
    /// A malformed identifier is a caller bug, not a runtime condition, so
    /// this fails loudly with an error rather than a sentinel.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(BlockId)
            .map_err(|_| IdError::Malformed(s.to_string()))
    }

    /// Whether `s` is a canonically formatted identifier.
    pub fn is_valid(s: &str) -> bool {
        Uuid::parse_str(s).is_ok()
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlockId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Input does not match the canonical UUID format.
    #[error("malformed block id: {0:?}")]
    Malformed(String),
}

/// Ordered composite key for a directed connection.
///
/// Replaces string concatenation of the endpoint ids: fixed-width typed
/// fields cannot collide the way variable-length concatenated strings can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub from: BlockId,
    pub to: BlockId,
}

impl PairKey {
    pub fn new(from: BlockId, to: BlockId) -> Self {
        Self { from, to }
    }

    /// The same pair with the direction flipped.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Whether either endpoint is `id`.
    pub fn touches(&self, id: BlockId) -> bool {
        self.from == id || self.to == id
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
