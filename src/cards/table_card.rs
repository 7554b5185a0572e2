//! Card records as the table zone sees them.
//!
//! `TableCard` keeps only what layout and command building need: where the
//! card sits on the grid, which cards hang off it, where it was last drawn
//! and which connectors end on it. Rules state lives elsewhere.
//!
//! ## Attachments
//!
//! Attachment is a display relation. The holder lists its attachments in fan
//! order and each attachment points back at its holder, but both remain
//! independent cards of the zone. While attached, a card is unplaced.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ArrowId, EntityId};
use crate::grid::{GridAddress, PixelPoint};

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableCard {
    /// Host-assigned card id.
    pub id: EntityId,

    /// Slot on the grid, or `GridAddress::UNPLACED`.
    pub grid: GridAddress,

    /// Cards fanned out behind this one, in fan order.
    pub attached_cards: SmallVec<[EntityId; 4]>,

    /// Holder this card is attached to.
    pub attached_to: Option<EntityId>,

    /// Top-left pixel position from the last layout pass.
    pub position: PixelPoint,

    /// Paint order from the last layout pass; higher draws on top.
    pub z_value: f64,

    /// Connectors starting at this card.
    pub arrows_from: SmallVec<[ArrowId; 2]>,

    /// Connectors ending at this card.
    pub arrows_to: SmallVec<[ArrowId; 2]>,

    pub face_down: bool,
    pub tapped: bool,

    /// Printed power/toughness, forwarded when the card changes zones.
    pub power_toughness: String,
}

impl TableCard {
    /// A face-up, untapped, unplaced card.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            grid: GridAddress::UNPLACED,
            attached_cards: SmallVec::new(),
            attached_to: None,
            position: PixelPoint::default(),
            z_value: 0.0,
            arrows_from: SmallVec::new(),
            arrows_to: SmallVec::new(),
            face_down: false,
            tapped: false,
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

    #[must_use]
    pub fn tapped(mut self) -> Self {
        self.tapped = true;
        self
    }

    /// Number of cards attached to this one.
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attached_cards.len()
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.grid.is_placed()
    }

    /// Every connector anchored on this card.
    pub fn arrows(&self) -> impl Iterator<Item = ArrowId> + '_ {
        self.arrows_from.iter().chain(self.arrows_to.iter()).copied()
    }

    /// Drop a connector from both endpoint lists.
    pub fn forget_arrow(&mut self, arrow: ArrowId) {
        self.arrows_from.retain(|a| *a != arrow);
        self.arrows_to.retain(|a| *a != arrow);
    }
}
