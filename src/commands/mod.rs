//! Outbound commands built from user gestures on the table.

pub mod command;

pub use command::{
    CardAttribute, CardToMove, CommandBatch, DraggedCard, ZoneCommand, ZoneRef,
};
