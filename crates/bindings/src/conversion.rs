//! Python↔Rust value conversion.
//!
//! Scalars passed to `Config.set` become [`Value`]s directly. Override dicts
//! are serialized to JSON and parsed as [`Overrides`], so Python and JSON
//! override documents share one schema.

use o3cfg_core::{ConfigError, Overrides, Value};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyInt, PyString};

/// Maps a parameter-system error to a Python `ValueError`.
pub fn config_error(err: ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Converts a Python scalar to a parameter value.
///
/// `bool` is checked before `int` because Python booleans are integers.
/// Non-negative integers become unsigned values, negative ones signed values,
/// and strings become enum variant names.
///
/// # Errors
///
/// `TypeError` for any other Python type.
pub fn py_to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(obj.extract()?));
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(v) = obj.extract::<u64>() {
            return Ok(Value::UInt(v));
        }
        return Ok(Value::Int(obj.extract::<i64>()?));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::Enum(obj.extract()?));
    }
    Err(PyTypeError::new_err(format!("unsupported parameter value: {obj}")))
}

/// Converts a Python dict to an override document.
///
/// # Arguments
///
/// * `py` - Python interpreter handle.
/// * `dict` - Parameter names mapped to scalars, `{"ref": "Parent.x"}` objects, or nested dicts.
///
/// # Returns
///
/// The parsed [`Overrides`], or a `PyErr` if the dict is not a valid document.
pub fn py_dict_to_overrides(py: Python<'_>, dict: &Bound<'_, PyAny>) -> PyResult<Overrides> {
    let json = py.import("json")?;
    let json_str: String = json.getattr("dumps")?.call1((dict,))?.extract()?;
    Overrides::from_json(&json_str).map_err(config_error)
}
