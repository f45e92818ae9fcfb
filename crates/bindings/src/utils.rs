//! Utility functions exposed to Python.
//!
//! Catalog lookup, version, and logging setup for the `o3cfg` module.

use o3cfg_core::Catalog;
use pyo3::exceptions::{PyKeyError, PyRuntimeError};
use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::conversion::config_error;
use crate::node::PyNodeType;

/// Returns the package version string.
#[pyfunction]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Looks up a built-in node type by name.
///
/// # Errors
///
/// `KeyError` if no such node type exists.
#[pyfunction]
pub fn node_type(name: &str) -> PyResult<PyNodeType> {
    let catalog = Catalog::global().map_err(config_error)?;
    catalog
        .node(name)
        .map(|n| PyNodeType::new(n.clone()))
        .ok_or_else(|| PyKeyError::new_err(format!("unknown node type '{name}'")))
}

/// Names of every built-in node type.
#[pyfunction]
pub fn node_types() -> PyResult<Vec<String>> {
    let catalog = Catalog::global().map_err(config_error)?;
    Ok(catalog.nodes().map(|n| n.type_name().to_string()).collect())
}

/// Installs a `tracing` subscriber writing to stderr.
///
/// Calling it again after a subscriber is installed does nothing.
///
/// # Arguments
///
/// * `filter` - An `EnvFilter` directive such as `"o3cfg_core=debug"`; defaults to `RUST_LOG`, then `info`.
///
/// # Errors
///
/// `RuntimeError` if the directive is invalid.
#[pyfunction]
#[pyo3(signature = (filter=None))]
pub fn init_logging(filter: Option<&str>) -> PyResult<()> {
    let filter = match filter {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info")),
    }
    .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

    // An existing global subscriber keeps its configuration.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
