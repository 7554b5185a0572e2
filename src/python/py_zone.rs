//! TableZone bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::cards::TableCard;
use crate::core::{ConfigSignal, DisplaySettings, EntityId, PlayerId, TableLayout};
use crate::grid::{GridAddress, PixelPoint};
use crate::zones::TableZone;

use super::py_core::PyGridAddress;
use super::to_py_err;

/// Python wrapper for TableZone with the default layout.
#[pyclass(name = "TableZone")]
pub struct PyTableZone {
    inner: TableZone,
}

#[pymethods]
impl PyTableZone {
    /// Create an empty table.
    ///
    /// # Arguments
    /// - player: Seat index of the owning player
    /// - mirrored: Whether this player's view is mirrored
    /// - invert_vertical: Global invert preference
    /// - card_width / card_height: Base card size in pixels
    #[new]
    #[pyo3(signature = (
        player = 0,
        mirrored = false,
        invert_vertical = false,
        card_width = 72.0,
        card_height = 102.0
    ))]
    fn new(
        player: u8,
        mirrored: bool,
        invert_vertical: bool,
        card_width: f64,
        card_height: f64,
    ) -> PyResult<Self> {
        let layout = TableLayout::default().with_card_size(card_width, card_height);
        let settings = DisplaySettings {
            invert_vertical_coordinate: invert_vertical,
            ..DisplaySettings::default()
        };
        let mut inner = TableZone::new(PlayerId::new(player), layout, settings).map_err(to_py_err)?;
        inner.set_mirrored(mirrored);
        Ok(Self { inner })
    }

    /// Place a card and re-lay out. Returns False if the id is taken.
    #[pyo3(signature = (card_id, column, row, power_toughness = ""))]
    fn add_card(&mut self, card_id: u32, column: i32, row: i32, power_toughness: &str) -> bool {
        let card = TableCard::new(EntityId(card_id)).with_power_toughness(power_toughness);
        self.inner.add_card(card, GridAddress::new(column, row))
    }

    /// Remove a card. Returns False if it was not on the table.
    fn take_card(&mut self, card_id: u32) -> bool {
        self.inner.take_card(EntityId(card_id), true).is_some()
    }

    fn move_card(&mut self, card_id: u32, column: i32, row: i32) -> bool {
        self.inner
            .move_card(EntityId(card_id), GridAddress::new(column, row))
    }

    fn attach_card(&mut self, child: u32, holder: u32) -> bool {
        self.inner.attach_card(EntityId(child), EntityId(holder))
    }

    fn detach_card(&mut self, child: u32, column: i32, row: i32) -> bool {
        self.inner
            .detach_card(EntityId(child), GridAddress::new(column, row))
    }

    fn reorganize(&mut self) {
        self.inner.reorganize();
    }

    fn set_mirrored(&mut self, mirrored: bool) {
        self.inner.set_mirrored(mirrored);
    }

    fn set_invert_vertical(&mut self, invert: bool) -> bool {
        self.inner
            .on_config_changed(&ConfigSignal::InvertVerticalChanged(invert))
    }

    #[getter]
    fn is_inverted(&self) -> bool {
        self.inner.is_inverted()
    }

    /// `(width, height)` of the zone.
    #[getter]
    fn size(&self) -> (f64, f64) {
        self.inner.size()
    }

    fn map_from_grid(&self, column: i32, row: i32) -> (f64, f64) {
        let p = self.inner.map_from_grid(GridAddress::new(column, row));
        (p.x, p.y)
    }

    fn map_to_grid(&self, x: f64, y: f64) -> PyGridAddress {
        PyGridAddress(self.inner.map_to_grid(PixelPoint::new(x, y)))
    }

    fn closest_grid_point(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.inner.closest_grid_point(PixelPoint::new(x, y));
        (p.x, p.y)
    }

    fn card_position(&self, card_id: u32) -> Option<(f64, f64)> {
        self.inner
            .card(EntityId(card_id))
            .map(|c| (c.position.x, c.position.y))
    }

    /// Card ids in paint order, bottom-most first.
    fn paint_order(&self) -> Vec<u32> {
        self.inner.paint_list().iter().map(|c| c.id.raw()).collect()
    }

    /// `(n, 2)` array of card positions in insertion order.
    fn positions_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let flat: Vec<f64> = self
            .inner
            .cards()
            .flat_map(|c| [c.position.x, c.position.y])
            .collect();
        let n = flat.len() / 2;
        PyArray1::from_vec_bound(py, flat)
            .reshape([n, 2])
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))
    }

    /// Encoded command batch toggling the tap state of `card_ids`.
    fn toggle_tapped<'py>(&self, py: Python<'py>, card_ids: Vec<u32>) -> PyResult<Bound<'py, PyBytes>> {
        let ids: Vec<EntityId> = card_ids.into_iter().map(EntityId).collect();
        let bytes = self.inner.toggle_tapped(&ids).encode().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Queued events, rendered for logging.
    fn drain_events(&mut self) -> Vec<String> {
        self.inner
            .drain_events()
            .iter()
            .map(|e| format!("{:?}", e))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        let (width, height) = self.inner.size();
        format!(
            "TableZone(player={}, cards={}, size={}x{})",
            self.inner.player().0,
            self.inner.len(),
            width,
            height
        )
    }
}
