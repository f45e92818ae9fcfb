//! Node type Python binding.
//!
//! Exposes a catalog node type: its capability answers, its parameter names,
//! and instantiation into a `Config`.

use std::sync::Arc;

use o3cfg_core::ConfigurationNode;
use pyo3::prelude::*;

use crate::config::PyConfig;

/// Python-exposed node type; wraps a shared, immutable schema.
#[pyclass(name = "NodeType", frozen)]
#[derive(Debug)]
pub struct PyNodeType {
    inner: Arc<ConfigurationNode>,
}

impl PyNodeType {
    /// Wraps a schema.
    pub const fn new(inner: Arc<ConfigurationNode>) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyNodeType {
    /// Model type name.
    #[getter]
    fn name(&self) -> String {
        self.inner.type_name().to_string()
    }

    /// Native binding as `(name, header)`, or `None` for abstract types.
    #[getter]
    fn binding(&self) -> Option<(String, String)> {
        self.inner
            .binding()
            .map(|b| (b.name().to_string(), b.header().to_string()))
    }

    /// Required memory-access mode (`"timing"`, `"atomic"`, ...).
    fn memory_mode(&self) -> &'static str {
        self.inner.memory_mode().as_str()
    }

    /// Whether caches must be attached.
    fn require_caches(&self) -> bool {
        self.inner.require_caches()
    }

    /// Whether the model can take over from a running core.
    fn support_take_over(&self) -> bool {
        self.inner.support_take_over()
    }

    /// Effective parameter names in resolution order.
    fn param_names(&self) -> Vec<String> {
        self.inner
            .params()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Description of parameter `name`.
    fn describe(&self, name: &str) -> Option<String> {
        self.inner.param(name).map(|p| format!("{} ({}): {}", p.name(), p.kind(), p.description()))
    }

    /// Creates a configuration seeded with every default.
    fn instantiate(&self) -> PyConfig {
        PyConfig::new(self.inner.instantiate())
    }

    fn __repr__(&self) -> String {
        format!("NodeType('{}')", self.inner.type_name())
    }
}
