//! Stable identifiers for things the table zone lays out.
//!
//! ## EntityId
//!
//! Every card on the table has an `EntityId`. Ids are assigned by the host
//! (the game client) and are never reinterpreted by the layout engine.
//!
//! ## ArrowId
//!
//! Visual connectors (targeting arrows drawn between two cards) are referenced
//! by `ArrowId` rather than by pointer, so a layout pass can collect the set of
//! connectors it touched and hand it back as plain data.
//!
//! ```
//! use ccg_table::core::{ArrowId, EntityId};
//!
//! let card = EntityId(10);
//! let arrow = ArrowId(3);
//!
//! assert_eq!(card.raw(), 10);
//! assert_eq!(format!("{}", arrow), "Arrow(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Identifier for a visual connector anchored between two cards.
///
/// Ordered so that a layout pass can report touched connectors in a
/// deterministic sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArrowId(pub u32);

impl ArrowId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ArrowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arrow({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
        assert_eq!(EntityId::from(7), EntityId(7));
    }

    #[test]
    fn test_arrow_ordering() {
        let mut arrows = vec![ArrowId(5), ArrowId(1), ArrowId(3)];
        arrows.sort();
        assert_eq!(arrows, vec![ArrowId(1), ArrowId(3), ArrowId(5)]);
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
