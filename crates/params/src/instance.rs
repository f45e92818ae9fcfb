//! Configuration instances.
//!
//! A [`ConfigurationInstance`] is the mutable value set of one configured
//! component. Values start at the schema defaults, may be overridden any
//! number of times, and are bound, validated and frozen by a single
//! [`finalize`](ConfigurationInstance::finalize). After a successful finalize
//! the instance rejects every further mutation.

use std::sync::Arc;

use tracing::trace;

use crate::common::{ConfigError, Result};
use crate::handoff::FrozenConfiguration;
use crate::node::ConfigurationNode;
use crate::params::{ParameterSpec, Reference, Value};
use crate::resolver;

/// Per-component value set for one node type.
#[derive(Debug, Clone)]
pub struct ConfigurationInstance {
    node: Arc<ConfigurationNode>,
    values: Vec<Value>,
    frozen: Option<Arc<FrozenConfiguration>>,
}

impl ConfigurationInstance {
    /// Creates an instance holding every effective default of `node`.
    pub(crate) fn new(node: Arc<ConfigurationNode>) -> Self {
        let values = node
            .params()
            .iter()
            .map(|p| adopt(p.default_value().clone()))
            .collect();
        Self {
            node,
            values,
            frozen: None,
        }
    }

    /// Schema of this instance.
    pub fn node(&self) -> &Arc<ConfigurationNode> {
        &self.node
    }

    /// Model type name.
    pub fn type_name(&self) -> &str {
        self.node.type_name()
    }

    /// Current value of `name`, before reference resolution.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.node.index_of(name).map(|i| &self.values[i])
    }

    /// Declarations and current values in effective-table order.
    pub fn entries(&self) -> impl Iterator<Item = (&ParameterSpec, &Value)> {
        self.node.params().iter().zip(self.values.iter())
    }

    /// Whether a finalize has succeeded on this instance.
    pub const fn is_finalized(&self) -> bool {
        self.frozen.is_some()
    }

    /// Overrides the value of `name`.
    ///
    /// Literal values are validated immediately and stored in canonical form.
    /// References are stored as-is and validated once bound at finalize.
    /// A child instance becomes part of this tree: any snapshot it was
    /// finalized into is dropped, and it is mutable again until this
    /// instance is finalized.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::AlreadyFinalized`] after a successful finalize.
    /// * [`ConfigError::UnknownParameter`] if `name` is not in the effective schema.
    /// * [`ConfigError::TypeMismatch`] if the value does not match the kind.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.ensure_mutable()?;
        let index = self.index(name)?;
        let spec = &self.node.params()[index];

        let value = match value.into() {
            r @ Value::Ref(_) if spec.kind().is_object() => {
                return Err(spec.kind().mismatch(name, &r));
            }
            r @ Value::Ref(_) => r,
            literal => adopt(spec.kind().check(name, literal)?),
        };

        trace!(node = self.type_name(), param = name, value = %value, "set parameter");
        self.values[index] = value;
        Ok(())
    }

    /// Overrides `name` with a reference parsed from `Self.<param>` / `Parent.<param>`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidReference`] for malformed text, otherwise as [`set`](Self::set).
    pub fn set_ref(&mut self, name: &str, reference: &str) -> Result<()> {
        let reference: Reference = reference.parse()?;
        self.set(name, reference)
    }

    /// Overrides a parameter addressed by a dotted path through object parameters,
    /// e.g. `branchPred.numThreads`.
    ///
    /// # Errors
    ///
    /// As [`set`](Self::set); an intermediate segment that is not an object
    /// parameter is a [`ConfigError::TypeMismatch`].
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        match path.split_once('.') {
            None => self.set(path, value),
            Some((head, rest)) => self.child_mut(head)?.set_path(rest, value),
        }
    }

    /// Mutable access to the child instance held by object parameter `name`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::AlreadyFinalized`] after a successful finalize.
    /// * [`ConfigError::UnknownParameter`] if `name` is not in the effective schema.
    /// * [`ConfigError::TypeMismatch`] if `name` does not currently hold an instance.
    pub fn child_mut(&mut self, name: &str) -> Result<&mut Self> {
        self.ensure_mutable()?;
        let index = self.index(name)?;
        let kind = self.node.params()[index].kind().clone();
        match &mut self.values[index] {
            Value::Object(child) => Ok(child.as_mut()),
            other => Err(kind.mismatch(name, other)),
        }
    }

    /// Child instance held by object parameter `name`.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.get(name).and_then(Value::as_object)
    }

    /// Resolves references, validates every value and freezes the instance.
    ///
    /// The instance is the root of its tree; its path is its type name and
    /// each child's path appends the owning parameter name. On failure the
    /// first error is returned and the instance stays mutable. Once frozen,
    /// repeated calls return the same snapshot.
    ///
    /// # Errors
    ///
    /// Any error from [`resolver::resolve`]: [`ConfigError::MissingBinding`],
    /// [`ConfigError::UnresolvedReference`], [`ConfigError::CyclicReference`]
    /// or [`ConfigError::TypeMismatch`].
    pub fn finalize(&mut self) -> Result<Arc<FrozenConfiguration>> {
        if let Some(frozen) = &self.frozen {
            return Ok(Arc::clone(frozen));
        }
        let frozen = Arc::new(resolver::resolve(self)?);
        self.frozen = Some(Arc::clone(&frozen));
        Ok(frozen)
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    fn index(&self, name: &str) -> Result<usize> {
        self.node
            .index_of(name)
            .ok_or_else(|| ConfigError::unknown_parameter(self.type_name(), name))
    }

    /// Drops the cached snapshot of this instance and every descendant.
    fn release(&mut self) {
        self.frozen = None;
        for value in &mut self.values {
            if let Value::Object(child) = value {
                child.release();
            }
        }
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen.is_some() {
            return Err(ConfigError::AlreadyFinalized {
                path: self.type_name().to_string(),
            });
        }
        Ok(())
    }
}

/// Unfreezes a child instance taken into a parent's value set.
fn adopt(value: Value) -> Value {
    match value {
        Value::Object(mut child) => {
            child.release();
            Value::Object(child)
        }
        other => other,
    }
}

impl PartialEq for ConfigurationInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node) && self.values == other.values
    }
}
