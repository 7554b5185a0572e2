//! Per-pass stack group widths.
//!
//! A stack group normally takes one card width. It grows when more than one
//! card shares it, or when its single occupant carries attachments that fan
//! out to the left:
//!
//! - one occupant: `card_width * (1 + attachments / 3)`
//! - N > 1 occupants: `card_width * (1 + (N - 1) / 3)`, attachments ignored
//!
//! The table is rebuilt from scratch on every layout pass and is never
//! patched incrementally.

use rustc_hash::FxHashMap;

use super::address::{GridAddress, StackGroupKey};

/// Widths of every occupied stack group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackWidthTable {
    base_width: f64,
    widths: FxHashMap<StackGroupKey, f64>,
}

impl StackWidthTable {
    /// An empty table; every lookup returns `base_width`.
    #[must_use]
    pub fn new(base_width: f64) -> Self {
        Self {
            base_width,
            widths: FxHashMap::default(),
        }
    }

    /// Build the table from `(address, attachment count)` pairs.
    ///
    /// Unplaced addresses are skipped. Occupancy is fully counted before
    /// any width is derived.
    ///
    /// ```
    /// use ccg_table::grid::{GridAddress, StackGroupKey, StackWidthTable};
    ///
    /// let table = StackWidthTable::compute(
    ///     100.0,
    ///     [(GridAddress::new(0, 0), 4), (GridAddress::UNPLACED, 0)],
    /// );
    /// let w = table.width(StackGroupKey::new(0, 0));
    /// assert!((w - 233.333).abs() < 0.001);
    /// assert_eq!(table.width(StackGroupKey::new(9, 2)), 100.0);
    /// ```
    pub fn compute<I>(base_width: f64, occupants: I) -> Self
    where
        I: IntoIterator<Item = (GridAddress, usize)>,
    {
        let placed: Vec<(StackGroupKey, usize)> = occupants
            .into_iter()
            .filter(|(addr, _)| addr.is_placed())
            .map(|(addr, attached)| (addr.stack_group(), attached))
            .collect();

        let mut counts: FxHashMap<StackGroupKey, usize> = FxHashMap::default();
        for (key, _) in &placed {
            *counts.entry(*key).or_insert(0) += 1;
        }

        let mut widths = FxHashMap::default();
        for (key, attached) in placed {
            let count = counts.get(&key).copied().unwrap_or(0);
            let extra = if count == 1 { attached } else { count - 1 };
            widths.insert(key, base_width * (1.0 + extra as f64 / 3.0));
        }

        Self { base_width, widths }
    }

    /// Width of a stack group; `base_width` if unoccupied.
    #[must_use]
    pub fn width(&self, key: StackGroupKey) -> f64 {
        self.widths.get(&key).copied().unwrap_or(self.base_width)
    }

    /// Whether the group had any occupant in this pass.
    #[must_use]
    pub fn is_occupied(&self, key: StackGroupKey) -> bool {
        self.widths.contains_key(&key)
    }

    /// Number of occupied groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Width every missing key defaults to.
    #[must_use]
    pub fn base_width(&self) -> f64 {
        self.base_width
    }
}
