//! Commands a table zone hands to the network layer.
//!
//! The zone never talks to the server itself. User gestures (dropping cards,
//! tapping a selection) are turned into `ZoneCommand` values, collected into
//! an ordered `CommandBatch` and given to the host in one piece.
//!
//! ## Example
//!
//! ```
//! use ccg_table::commands::{CardAttribute, CommandBatch, ZoneCommand};
//! use ccg_table::core::EntityId;
//!
//! let mut batch = CommandBatch::new();
//! batch.push(ZoneCommand::SetCardAttr {
//!     zone: "table".into(),
//!     card_id: EntityId(7),
//!     attribute: CardAttribute::Tapped,
//!     value: "1".into(),
//! });
//!
//! let bytes = batch.encode().unwrap();
//! assert_eq!(CommandBatch::decode(&bytes).unwrap(), batch);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, LayoutResult, PlayerId};

/// A zone addressed across players: "player 1's graveyard".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneRef {
    pub player: PlayerId,
    pub zone: String,
}

impl ZoneRef {
    #[must_use]
    pub fn new(player: PlayerId, zone: impl Into<String>) -> Self {
        Self {
            player,
            zone: zone.into(),
        }
    }
}

/// A card being dragged, as reported by the drag layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggedCard {
    pub id: EntityId,
    pub face_down: bool,
    pub power_toughness: String,
}

impl DraggedCard {
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            face_down: false,
            power_toughness: String::new(),
        }
    }

    #[must_use]
    pub fn with_power_toughness(mut self, pt: impl Into<String>) -> Self {
        self.power_toughness = pt.into();
        self
    }

    #[must_use]
    pub fn face_down(mut self) -> Self {
        self.face_down = true;
        self
    }
}

/// One card inside a move command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardToMove {
    pub card_id: EntityId,
    pub face_down: bool,
    /// Printed power/toughness; only sent when the card enters from
    /// another zone.
    pub power_toughness: Option<String>,
}

/// Card attributes a zone can ask the server to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardAttribute {
    Tapped,
    Attacking,
    FaceDown,
    DoesntUntap,
    PowerToughness,
    Annotation,
}

/// A request for the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneCommand {
    /// Move cards from `start` into `target` at grid slot `(x, y)`.
    MoveCards {
        start: ZoneRef,
        target: ZoneRef,
        x: i32,
        y: i32,
        cards: Vec<CardToMove>,
    },
    /// Set an attribute on a single card.
    SetCardAttr {
        zone: String,
        card_id: EntityId,
        attribute: CardAttribute,
        value: String,
    },
}

impl ZoneCommand {
    /// Cards this command refers to.
    #[must_use]
    pub fn card_ids(&self) -> Vec<EntityId> {
        match self {
            ZoneCommand::MoveCards { cards, .. } => cards.iter().map(|c| c.card_id).collect(),
            ZoneCommand::SetCardAttr { card_id, .. } => vec![*card_id],
        }
    }
}

/// Ordered commands sent as one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBatch {
    commands: Vec<ZoneCommand>,
}

impl CommandBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: ZoneCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneCommand> {
        self.commands.iter()
    }

    #[must_use]
    pub fn commands(&self) -> &[ZoneCommand] {
        &self.commands
    }

    /// Encode for the wire.
    pub fn encode(&self) -> LayoutResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a batch produced by `encode`.
    pub fn decode(bytes: &[u8]) -> LayoutResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl From<ZoneCommand> for CommandBatch {
    fn from(command: ZoneCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

impl FromIterator<ZoneCommand> for CommandBatch {
    fn from_iter<I: IntoIterator<Item = ZoneCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CommandBatch {
    type Item = ZoneCommand;
    type IntoIter = std::vec::IntoIter<ZoneCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LayoutError;

    fn move_command() -> ZoneCommand {
        ZoneCommand::MoveCards {
            start: ZoneRef::new(PlayerId::new(0), "hand"),
            target: ZoneRef::new(PlayerId::new(0), "table"),
            x: 3,
            y: 1,
            cards: vec![
                CardToMove {
                    card_id: EntityId(10),
                    face_down: false,
                    power_toughness: Some("2/2".into()),
                },
                CardToMove {
                    card_id: EntityId(11),
                    face_down: true,
                    power_toughness: None,
                },
            ],
        }
    }

    #[test]
    fn test_card_ids() {
        assert_eq!(move_command().card_ids(), vec![EntityId(10), EntityId(11)]);
    }

    #[test]
    fn test_batch_preserves_order() {
        let batch: CommandBatch = vec![
            move_command(),
            ZoneCommand::SetCardAttr {
                zone: "table".into(),
                card_id: EntityId(10),
                attribute: CardAttribute::Tapped,
                value: "1".into(),
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(batch.len(), 2);
        assert!(matches!(batch.commands()[0], ZoneCommand::MoveCards { .. }));

        let decoded = CommandBatch::decode(&batch.encode().unwrap()).unwrap();
        assert_eq!(decoded, batch);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = CommandBatch::decode(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        assert!(matches!(err, Err(LayoutError::Codec(_))));
    }
}
