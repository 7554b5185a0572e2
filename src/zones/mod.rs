//! Table zones: layout orchestration for each player's play surface.
//!
//! - `table_zone`: one player's table, the `reorganize` pass, resize, drops
//! - `table`: every player's table plus settings broadcast
//! - `events`: notifications queued for the host

pub mod events;
pub mod table_zone;
pub mod table;

pub use events::ZoneEvent;
pub use table_zone::{paint_order, TableZone, TABLE_ZONE_NAME};
pub use table::Table;
