//! The slot grid and its pixel mapping.
//!
//! - `address`: `GridAddress`, `StackGroupKey`, `PixelPoint`
//! - `widths`: per-pass stack group widths
//! - `mapper`: slot <-> pixel conversion

pub mod address;
pub mod widths;
pub mod mapper;

pub use address::{GridAddress, PixelPoint, StackGroupKey, STACK_GROUP_SIZE};
pub use widths::StackWidthTable;
pub use mapper::CoordinateMapper;
