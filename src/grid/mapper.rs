//! Conversion between grid slots and zone pixels.
//!
//! `CoordinateMapper` is a borrowed view over everything the mapping depends
//! on: layout constants, the current width table, the inversion flag and the
//! zone bounds. It holds no state of its own, so building one per call is
//! free.
//!
//! ## Inversion
//!
//! Mirroring relabels rows (`row -> rows - 1 - row`) on the vertical axis
//! only. Width lookups always use the unmirrored row, which keeps the width
//! table valid no matter how the zone is viewed.

use super::address::{GridAddress, PixelPoint, StackGroupKey, STACK_GROUP_SIZE};
use super::widths::StackWidthTable;
use crate::core::TableLayout;

/// Bidirectional slot/pixel mapping for one layout pass.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper<'a> {
    layout: &'a TableLayout,
    widths: &'a StackWidthTable,
    inverted: bool,
    zone_width: f64,
    zone_height: f64,
}

impl<'a> CoordinateMapper<'a> {
    /// Create a mapper over a zone of `zone_width x zone_height` pixels.
    #[must_use]
    pub fn new(
        layout: &'a TableLayout,
        widths: &'a StackWidthTable,
        inverted: bool,
        zone_width: f64,
        zone_height: f64,
    ) -> Self {
        debug_assert!(layout.card_width > 0.0, "card_width must be positive");
        Self {
            layout,
            widths,
            inverted,
            zone_width,
            zone_height,
        }
    }

    /// Whether rows are mirrored.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn display_row(&self, row: i32) -> i32 {
        if self.inverted {
            self.layout.rows - 1 - row
        } else {
            row
        }
    }

    /// Top-left pixel of a placed slot.
    ///
    /// Horizontal placement is cumulative: every stack group to the left in
    /// the same row contributes its current width plus `padding_x`, so a
    /// wider group pushes everything after it to the right.
    #[must_use]
    pub fn map_from_grid(&self, addr: GridAddress) -> PixelPoint {
        let layout = self.layout;
        let sub = f64::from(addr.sub_offset());

        let mut x = layout.margin_x + sub * layout.sub_column_width();
        for group in 0..addr.column / STACK_GROUP_SIZE {
            x += self.widths.width(StackGroupKey::new(group, addr.row)) + layout.padding_x;
        }

        let row = self.display_row(addr.row);
        let y = layout.box_line_width
            + f64::from(row) * layout.row_pitch()
            + sub * layout.stack_offset_y;

        PixelPoint::new(x, y)
    }

    /// Nearest slot to a pixel position.
    ///
    /// Out-of-bounds input is clamped to the play area. Both axes round to
    /// the nearest cell by adding half a cell before dividing.
    #[must_use]
    pub fn map_to_grid(&self, point: PixelPoint) -> GridAddress {
        let layout = self.layout;

        let max_x = self.zone_width - layout.card_width - layout.margin_x;
        let max_y = self.zone_height - layout.card_height;
        let x = clamp_low_first(point.x - layout.margin_x, max_x);
        let y = clamp_low_first(point.y - layout.box_line_width, max_y);

        let row = ((y + layout.row_pitch() / 2.0) / layout.row_pitch()).floor() as i32;
        let row = self.display_row(row.clamp(0, layout.rows - 1));

        let sub_width = layout.sub_column_width();
        let probe = x + sub_width / 2.0;

        let mut group = -1;
        let mut group_start;
        let mut group_end = 0.0;
        loop {
            group += 1;
            group_start = group_end;
            group_end += self.widths.width(StackGroupKey::new(group, row)) + layout.padding_x;
            if group_end > probe {
                break;
            }
        }

        let sub = (((probe - group_start) / sub_width).floor() as i32).min(STACK_GROUP_SIZE - 1);
        GridAddress::new(group * STACK_GROUP_SIZE + sub, row)
    }
}

/// Clamp to `[0, max]`, preferring 0 when the range is empty.
///
/// NaN lands on 0; the group walk in `map_to_grid` needs a finite probe.
fn clamp_low_first(value: f64, max: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value > max {
        max.max(0.0)
    } else {
        value
    }
}
