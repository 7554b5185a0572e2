//! Value type bindings for Python.

use pyo3::prelude::*;

use crate::grid::GridAddress;

/// Python wrapper for GridAddress.
#[pyclass(name = "GridAddress")]
#[derive(Clone, Copy, Debug)]
pub struct PyGridAddress(pub GridAddress);

#[pymethods]
impl PyGridAddress {
    #[new]
    fn new(column: i32, row: i32) -> Self {
        Self(GridAddress::new(column, row))
    }

    #[getter]
    fn column(&self) -> i32 {
        self.0.column
    }

    #[getter]
    fn row(&self) -> i32 {
        self.0.row
    }

    /// False for the unplaced sentinel (column -1).
    fn is_placed(&self) -> bool {
        self.0.is_placed()
    }

    /// `(group, row)` of the stack group this slot belongs to.
    fn stack_group(&self) -> (i32, i32) {
        let key = self.0.stack_group();
        (key.group, key.row)
    }

    fn __repr__(&self) -> String {
        format!("GridAddress({}, {})", self.0.column, self.0.row)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        ((self.0.column as u32 as u64) << 32) | self.0.row as u32 as u64
    }
}
