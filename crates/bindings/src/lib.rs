//! Python bindings for the out-of-order CPU parameter schemas.
//!
//! This crate exposes the parameter system to configuration scripts via PyO3. It provides:
//! 1. **Node types:** `NodeType` for capability queries and instantiation of catalog models.
//! 2. **Configurations:** `Config` for overrides, references, and finalize to the handoff JSON.
//! 3. **Utilities:** Catalog lookup, version string, and logging setup.

use pyo3::prelude::*;

/// Python value and dict conversion, and error mapping.
pub mod conversion;
/// Configuration instance binding (`PyConfig`).
pub mod config;
/// Node type binding (`PyNodeType`).
pub mod node;
/// Module-level functions.
pub mod utils;

/// Registers all classes and functions onto the given Python module.
///
/// # Arguments
///
/// * `m` - The Python module to register types and functions on.
///
/// # Returns
///
/// `Ok(())` on success, or a `PyErr` if registration fails.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<node::PyNodeType>()?;
    m.add_class::<config::PyConfig>()?;

    m.add_function(wrap_pyfunction!(utils::node_type, m)?)?;
    m.add_function(wrap_pyfunction!(utils::node_types, m)?)?;
    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::init_logging, m)?)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_module(m)
}
