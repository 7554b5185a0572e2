//! # ccg-table
//!
//! Spatial layout for the table zone of a card-game client: the play
//! surface where each player's permanents sit.
//!
//! ## Design Principles
//!
//! 1. **Grid First**: Cards live on a discrete `(column, row)` grid. Pixels
//!    are derived, never stored as truth.
//!
//! 2. **Data-Dependent Width**: Every three columns form a stack group whose
//!    width grows with stacked cards and attachments. A wider group pushes
//!    every later group in its row to the right.
//!
//! 3. **Rebuild, Don't Patch**: Widths, positions and the zone size are
//!    recomputed from the live card set on every layout pass.
//!
//! ## Architecture
//!
//! - **Mirroring**: Opponents' tables are flipped by relabeling rows on the
//!   vertical axis. Width bookkeeping stays keyed by the unflipped row.
//!
//! - **Plain-Data Outputs**: Connector updates, size changes and server
//!   commands are returned as values (`ZoneEvent`, `ZoneCommand`) instead of
//!   callbacks.
//!
//! - **Persistent Data Structures**: Zone cards are held in `im`
//!   collections, so drop previews clone a zone in O(1).
//!
//! ## Modules
//!
//! - `core`: Ids, players, layout configuration, errors
//! - `grid`: Grid addresses, stack widths, coordinate mapping
//! - `cards`: Card records as placed on the table
//! - `zones`: Table zones and the per-player table
//! - `commands`: Commands built from drops and tap toggles

pub mod core;
pub mod grid;
pub mod cards;
pub mod zones;
pub mod commands;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ArrowId, EntityId, PlayerId, PlayerMap,
    TableLayout, DisplaySettings, ConfigSignal,
    LayoutError, LayoutResult,
};

pub use crate::grid::{GridAddress, StackGroupKey, PixelPoint, StackWidthTable, CoordinateMapper};

pub use crate::cards::TableCard;

pub use crate::zones::{Table, TableZone, ZoneEvent};

pub use crate::commands::{
    CardAttribute, CardToMove, CommandBatch, DraggedCard, ZoneCommand, ZoneRef,
};
