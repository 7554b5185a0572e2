//! Python bindings for the table layout engine.
//!
//! Lets Python tooling (replay viewers, layout regression scripts) drive a
//! table zone directly.
//!
//! # Quick Start
//!
//! ```python
//! import ccg_table as ct
//!
//! zone = ct.TableZone(player=0)
//! zone.add_card(1, column=0, row=0)
//! zone.add_card(2, column=3, row=0)
//!
//! x, y = zone.card_position(2)
//! assert zone.map_to_grid(x, y) == ct.GridAddress(3, 0)
//!
//! zone.attach_card(2, 1)
//!
//! positions = zone.positions_numpy()   # (n, 2) float64
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_zone;

pub use py_core::*;
pub use py_zone::*;

use crate::core::LayoutError;

pub(crate) fn to_py_err(err: LayoutError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", err))
}

/// ccg_table: grid layout for card-game table zones.
#[pymodule]
fn ccg_table(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGridAddress>()?;
    m.add_class::<PyTableZone>()?;
    Ok(())
}
