//! Core types: ids, players, layout configuration and errors.
//!
//! Everything here is independent of how the table is laid out; the grid
//! and zone modules build on it.

pub mod entity;
pub mod player;
pub mod config;
pub mod error;

pub use entity::{ArrowId, EntityId};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use config::{ConfigSignal, DisplaySettings, TableLayout};
pub use error::{LayoutError, LayoutResult};
