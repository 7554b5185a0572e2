//! Cards as placed on the table.

pub mod table_card;

pub use table_card::TableCard;
