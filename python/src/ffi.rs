//! ffi.rs
//! Python-facing wrappers over the decoder.
//!
//! Error mapping:
//! - bad header or options -> `ValueError`
//! - buffer too short      -> `IndexError`

use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use movespace_core::cursor::SliceCursor;
use movespace_core::headers::{MovespaceHeader, RawHeader};
use movespace_core::measures::{layout, parse_movespace_measures};
use movespace_core::types::MovespaceError;

pub fn register(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(decode_measures, m)?)?;
    m.add_function(wrap_pyfunction!(expected_len, m)?)?;
    m.add_function(wrap_pyfunction!(required_len, m)?)?;
    Ok(())
}

fn to_py_err(e: MovespaceError) -> PyErr {
    if e.is_out_of_range() {
        PyIndexError::new_err(e.to_string())
    } else if e.is_invalid_input() {
        PyValueError::new_err(e.to_string())
    } else {
        PyRuntimeError::new_err(e.to_string())
    }
}

fn header(endianness: &str, measure_count: i64, energy_measure_count: i64) -> PyResult<MovespaceHeader> {
    RawHeader {
        endianness: endianness.to_owned(),
        measure_count,
        energy_measure_count,
    }
    .validate()
    .map_err(|e| to_py_err(e.into()))
}

/// decode_measures(data, endianness, measure_count, energy_measure_count, offset=0) -> list[float]
#[pyfunction]
#[pyo3(signature = (data, endianness, measure_count, energy_measure_count, offset = 0))]
fn decode_measures(
    py: Python<'_>,
    data: &[u8],
    endianness: &str,
    measure_count: i64,
    energy_measure_count: i64,
    offset: u64,
) -> PyResult<Vec<f64>> {
    let header = header(endianness, measure_count, energy_measure_count)?;
    py.allow_threads(|| {
        let mut cursor = SliceCursor::at(data, offset);
        parse_movespace_measures(&mut cursor, &header)
    })
    .map_err(|e| to_py_err(e.into()))
}

/// expected_len(measure_count, energy_measure_count) -> int
#[pyfunction]
fn expected_len(measure_count: i64, energy_measure_count: i64) -> PyResult<u64> {
    let header = header("little", measure_count, energy_measure_count)?;
    Ok(layout::expected_len(&header))
}

/// required_len(measure_count, energy_measure_count, offset=0) -> int
#[pyfunction]
#[pyo3(signature = (measure_count, energy_measure_count, offset = 0))]
fn required_len(measure_count: i64, energy_measure_count: i64, offset: u64) -> PyResult<u64> {
    let header = header("little", measure_count, energy_measure_count)?;
    Ok(layout::required_len(offset, &header))
}
