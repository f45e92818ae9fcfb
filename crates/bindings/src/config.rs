//! Configuration Python binding.
//!
//! A `Config` wraps one instance tree. Scripts override values, optionally
//! through dotted paths into child instances, then call `finalize` once to
//! receive the handoff table as JSON.

use o3cfg_core::{ConfigurationInstance, Reference};
use pyo3::prelude::*;

use crate::conversion::{config_error, py_dict_to_overrides, py_to_value};

/// Python-exposed configuration instance.
#[pyclass(name = "Config")]
#[derive(Debug)]
pub struct PyConfig {
    inner: ConfigurationInstance,
}

impl PyConfig {
    /// Wraps an instance.
    pub const fn new(inner: ConfigurationInstance) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyConfig {
    /// Model type name of the root instance.
    #[getter]
    fn type_name(&self) -> String {
        self.inner.type_name().to_string()
    }

    /// Whether `finalize` has succeeded.
    #[getter]
    fn finalized(&self) -> bool {
        self.inner.is_finalized()
    }

    /// Overrides a parameter.
    ///
    /// # Arguments
    ///
    /// * `path` - Parameter name, or a dotted path such as `branchPred.BTBEntries`.
    /// * `value` - `bool`, `int`, or enum variant name.
    fn set(&mut self, path: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let value = py_to_value(value)?;
        self.inner.set_path(path, value).map_err(config_error)
    }

    /// Overrides a parameter with a reference such as `Parent.numThreads`.
    fn set_ref(&mut self, path: &str, reference: &str) -> PyResult<()> {
        let reference: Reference = reference.parse().map_err(config_error)?;
        self.inner.set_path(path, reference).map_err(config_error)
    }

    /// Applies an override dict.
    fn apply(&mut self, py: Python<'_>, overrides: &Bound<'_, PyAny>) -> PyResult<()> {
        py_dict_to_overrides(py, overrides)?
            .apply_to(&mut self.inner)
            .map_err(config_error)
    }

    /// Current value at `path`, before reference resolution, as text.
    fn get(&self, path: &str) -> Option<String> {
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };
        let mut inst = &self.inner;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            inst = inst.child(segment)?;
        }
        inst.get(leaf).map(ToString::to_string)
    }

    /// Resolves, validates and freezes the configuration.
    ///
    /// # Returns
    ///
    /// The handoff table as a JSON string. Repeated calls return the same table.
    fn finalize(&mut self) -> PyResult<String> {
        let frozen = self.inner.finalize().map_err(config_error)?;
        frozen.to_json().map_err(config_error)
    }

    fn __repr__(&self) -> String {
        format!("Config('{}')", self.inner.type_name())
    }
}
