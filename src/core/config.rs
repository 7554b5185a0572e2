//! Table layout configuration.
//!
//! Hosts configure a table zone at startup with:
//! - `TableLayout`: pixel constants for cards, margins, padding and lanes
//! - `DisplaySettings`: user preferences that affect layout (background,
//!   global vertical invert)
//!
//! `ConfigSignal` carries a single settings change from the host's settings
//! layer into a zone, which re-lays itself out in response.

use serde::{Deserialize, Serialize};

use super::error::{LayoutError, LayoutResult};

/// Pixel constants that define the table grid.
///
/// Defaults match a 72x102 card on a three-lane table.
///
/// ```
/// use ccg_table::core::TableLayout;
///
/// let layout = TableLayout::default()
///     .with_card_size(100.0, 140.0)
///     .with_padding(10.0, 10.0);
///
/// assert!(layout.validate().is_ok());
/// assert_eq!(layout.row_pitch(), 140.0 + 10.0 + 20.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Base card width. Every stack group is at least this wide.
    pub card_width: f64,

    /// Card height.
    pub card_height: f64,

    /// Horizontal gap between stack groups.
    pub padding_x: f64,

    /// Vertical gap between lanes.
    pub padding_y: f64,

    /// Left margin before the first stack group.
    pub margin_x: f64,

    /// Width of the zone outline; also the top offset of the first lane.
    pub box_line_width: f64,

    /// Extra vertical room per lane on top of the card height.
    pub lane_gap: f64,

    /// Minimum content width, before margins and outline.
    pub min_width: f64,

    /// Number of lanes.
    pub rows: i32,

    /// Vertical step per sub-column inside a stack group.
    pub stack_offset_y: f64,

    /// How far a card carrying attachments drops below its slot.
    pub attachment_drop: f64,

    /// Vertical offset of attachments relative to the holder's slot.
    pub attachment_offset_y: f64,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            card_width: 72.0,
            card_height: 102.0,
            padding_x: 35.0,
            padding_y: 10.0,
            margin_x: 20.0,
            box_line_width: 10.0,
            lane_gap: 20.0,
            min_width: 15.0 * 72.0 / 2.0,
            rows: 3,
            stack_offset_y: 10.0,
            attachment_drop: 15.0,
            attachment_offset_y: 5.0,
        }
    }
}

impl TableLayout {
    /// Set the base card size.
    #[must_use]
    pub fn with_card_size(mut self, width: f64, height: f64) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    /// Set the horizontal and vertical padding.
    #[must_use]
    pub fn with_padding(mut self, x: f64, y: f64) -> Self {
        self.padding_x = x;
        self.padding_y = y;
        self
    }

    /// Set the left margin.
    #[must_use]
    pub fn with_margin(mut self, margin_x: f64) -> Self {
        self.margin_x = margin_x;
        self
    }

    /// Set the number of lanes.
    #[must_use]
    pub fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the extra per-lane gap.
    #[must_use]
    pub fn with_lane_gap(mut self, gap: f64) -> Self {
        self.lane_gap = gap;
        self
    }

    /// Set the minimum content width.
    #[must_use]
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Distance between the tops of two adjacent lanes.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.card_height + self.padding_y + self.lane_gap
    }

    /// Horizontal step between sub-columns of one stack group.
    #[must_use]
    pub fn sub_column_width(&self) -> f64 {
        self.card_width / 3.0
    }

    /// Zone height implied by the lane count. Never changes after creation.
    #[must_use]
    pub fn zone_height(&self) -> f64 {
        let rows = f64::from(self.rows);
        2.0 * self.box_line_width
            + rows * (self.card_height + self.lane_gap)
            + (rows - 1.0) * self.padding_y
    }

    /// Width of an empty zone.
    #[must_use]
    pub fn initial_width(&self) -> f64 {
        self.min_width + 2.0 * self.margin_x + 2.0 * self.box_line_width
    }

    /// Check that the constants describe a usable grid.
    ///
    /// `map_to_grid` walks stack groups until it passes the pointer, which
    /// only terminates if every step is strictly positive.
    pub fn validate(&self) -> LayoutResult<()> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> LayoutResult<()> {
            if ok {
                Ok(())
            } else {
                Err(LayoutError::InvalidLayout { field, reason })
            }
        }

        check(
            self.card_width.is_finite() && self.card_width > 0.0,
            "card_width",
            "must be positive",
        )?;
        check(
            self.card_height.is_finite() && self.card_height > 0.0,
            "card_height",
            "must be positive",
        )?;
        for (field, value) in [
            ("padding_x", self.padding_x),
            ("padding_y", self.padding_y),
            ("margin_x", self.margin_x),
            ("box_line_width", self.box_line_width),
            ("lane_gap", self.lane_gap),
            ("min_width", self.min_width),
        ] {
            check(
                value.is_finite() && value >= 0.0,
                field,
                "must be finite and not negative",
            )?;
        }
        // Offsets may point either way
        for (field, value) in [
            ("stack_offset_y", self.stack_offset_y),
            ("attachment_drop", self.attachment_drop),
            ("attachment_offset_y", self.attachment_offset_y),
        ] {
            check(value.is_finite(), field, "must be finite")?;
        }
        check(self.rows > 0, "rows", "need at least one lane")?;
        Ok(())
    }
}

/// User display preferences that change how the table is laid out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Custom background image. `None` paints the default colour.
    pub background_path: Option<String>,

    /// Global "invert vertical coordinate" preference.
    pub invert_vertical_coordinate: bool,
}

impl DisplaySettings {
    /// Set the background image path.
    #[must_use]
    pub fn with_background(mut self, path: impl Into<String>) -> Self {
        self.background_path = Some(path.into());
        self
    }

    /// Enable the global vertical invert.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert_vertical_coordinate = true;
        self
    }
}

/// A single change coming from the host's settings layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSignal {
    /// The table background image changed (empty path clears it).
    BackgroundPathChanged(Option<String>),
    /// The global vertical invert preference changed.
    InvertVerticalChanged(bool),
}

impl DisplaySettings {
    /// Apply a signal. Returns true if anything changed.
    pub fn apply(&mut self, signal: &ConfigSignal) -> bool {
        match signal {
            ConfigSignal::BackgroundPathChanged(path) => {
                let path = path.clone().filter(|p| !p.is_empty());
                if self.background_path == path {
                    return false;
                }
                self.background_path = path;
                true
            }
            ConfigSignal::InvertVerticalChanged(invert) => {
                if self.invert_vertical_coordinate == *invert {
                    return false;
                }
                self.invert_vertical_coordinate = *invert;
                true
            }
        }
    }
}
