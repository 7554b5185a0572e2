//! Error type for the fallible edges of the crate.
//!
//! Layout itself never fails: bad pixel input clamps, missing widths default
//! and unplaced cards are skipped. Errors only come from configuring a zone
//! with unusable constants or seat count, addressing a seat that does not
//! exist, or encoding a command batch for the wire.

use thiserror::Error;

use super::player::PlayerId;

/// Result alias used throughout the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout constant `{field}`: {reason}")]
    InvalidLayout {
        field: &'static str,
        reason: &'static str,
    },
    #[error("no table zone for {0}")]
    UnknownPlayer(PlayerId),
    #[error("a table needs between 1 and {max} players, got {count}")]
    InvalidPlayerCount { count: usize, max: usize },
    #[error("command batch codec failed: {0}")]
    Codec(#[from] bincode::Error),
}
