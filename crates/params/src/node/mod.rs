//! Configuration node schemas.
//!
//! A [`ConfigurationNode`] is the schema of one model type. It performs:
//! 1. **Composition:** Layers its own parameter table over the parent's effective table by name.
//! 2. **Binding:** Names the native type and header that will receive finalized values.
//! 3. **Capabilities:** Answers instance-independent capability queries, inheriting unset ones.
//! 4. **Instantiation:** Produces a [`ConfigurationInstance`] seeded with every effective default.
//!
//! Nodes are declared once through [`NodeBuilder`] and shared immutably via `Arc`.

/// Capability query types and tables.
pub mod capability;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::common::{ConfigError, Result};
use crate::instance::ConfigurationInstance;
use crate::params::ParameterSpec;

pub use capability::{Capability, CapabilityTable, CapabilityValue, FlagFn, MemoryMode, MemoryModeFn};

/// Identity of the native counterpart that receives a node's values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Binding {
    name: String,
    header: String,
}

impl Binding {
    /// Creates a binding from a native type name and its declaring header.
    pub fn new(name: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: header.into(),
        }
    }

    /// Native type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header declaring the native type.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Both halves are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.header.trim().is_empty()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.header)
    }
}

/// Schema of one model type.
#[derive(Debug)]
pub struct ConfigurationNode {
    type_name: String,
    parent: Option<Arc<ConfigurationNode>>,
    binding: Option<Binding>,
    own_params: Vec<ParameterSpec>,
    params: Vec<ParameterSpec>,
    capabilities: CapabilityTable,
}

impl ConfigurationNode {
    /// Declares a node type.
    ///
    /// Builds the effective parameter table by layering `params` over the
    /// parent's effective table: a name present in both replaces the
    /// inherited entry in place, new names are appended in declaration order.
    ///
    /// # Arguments
    ///
    /// * `type_name` - Name of the model type.
    /// * `parent` - Node whose effective schema is extended, if any.
    /// * `binding` - Native counterpart; `None` for nodes that never back a live component.
    /// * `params` - This layer's parameter declarations.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::DuplicateParameter`] if a name repeats within `params`.
    /// * [`ConfigError::TypeMismatch`] if an override changes an inherited kind
    ///   or a default does not match its kind.
    /// * [`ConfigError::MissingBinding`] if a binding is given with an empty half.
    pub fn declare(
        type_name: impl Into<String>,
        parent: Option<&Arc<Self>>,
        binding: Option<Binding>,
        params: Vec<ParameterSpec>,
    ) -> Result<Arc<Self>> {
        let type_name = type_name.into();
        Self::declare_with(type_name, parent, binding, params, CapabilityTable::default())
    }

    fn declare_with(
        type_name: String,
        parent: Option<&Arc<Self>>,
        binding: Option<Binding>,
        own_params: Vec<ParameterSpec>,
        capabilities: CapabilityTable,
    ) -> Result<Arc<Self>> {
        if let Some(b) = &binding {
            if !b.is_complete() {
                return Err(ConfigError::MissingBinding {
                    type_name,
                    path: "<declaration>".to_string(),
                });
            }
        }

        let inherited = parent.map(|p| p.params()).unwrap_or_default();
        let params = merge_params(&type_name, inherited, &own_params)?;

        debug!(
            node = %type_name,
            parent = parent.map(|p| p.type_name()),
            own = own_params.len(),
            effective = params.len(),
            "declared node"
        );

        Ok(Arc::new(Self {
            type_name,
            parent: parent.cloned(),
            binding,
            own_params,
            params,
            capabilities,
        }))
    }

    /// Model type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Parent schema, if this node extends one.
    pub const fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Native binding; bindings are not inherited.
    pub const fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    /// Effective parameter table in resolution order.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Parameters declared by this layer only.
    pub fn own_params(&self) -> &[ParameterSpec] {
        &self.own_params
    }

    /// Position of `name` in the effective table.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name() == name)
    }

    /// Effective declaration of `name`.
    pub fn param(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// This node followed by each ancestor, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |n| n.parent.as_deref())
    }

    /// Whether this node is `type_name` or extends it.
    pub fn is_a(&self, type_name: &str) -> bool {
        self.ancestry().any(|n| n.type_name == type_name)
    }

    /// Creates an instance seeded with every effective default.
    pub fn instantiate(self: &Arc<Self>) -> ConfigurationInstance {
        ConfigurationInstance::new(Arc::clone(self))
    }

    /// Evaluates a capability query for this node type.
    ///
    /// Uses the nearest layer that declares the capability; if none does,
    /// the answer is [`MemoryMode::Invalid`] or `false`.
    pub fn capability(&self, cap: Capability) -> CapabilityValue {
        let table = self.ancestry().map(|n| n.capabilities).find(|t| t.declares(cap));
        let Some(table) = table else {
            return capability::fallback(cap);
        };
        match cap {
            Capability::MemoryMode => {
                CapabilityValue::MemoryMode(table.memory_mode.map_or(MemoryMode::Invalid, |f| f(self)))
            }
            Capability::RequireCaches => {
                CapabilityValue::Flag(table.require_caches.is_some_and(|f| f(self)))
            }
            Capability::SupportTakeOver => {
                CapabilityValue::Flag(table.support_take_over.is_some_and(|f| f(self)))
            }
        }
    }

    /// Memory-access mode this model requires.
    pub fn memory_mode(&self) -> MemoryMode {
        match self.capability(Capability::MemoryMode) {
            CapabilityValue::MemoryMode(m) => m,
            CapabilityValue::Flag(_) => MemoryMode::Invalid,
        }
    }

    /// Whether caches must be attached for correct operation.
    pub fn require_caches(&self) -> bool {
        matches!(self.capability(Capability::RequireCaches), CapabilityValue::Flag(true))
    }

    /// Whether this model can take over from another running core.
    pub fn support_take_over(&self) -> bool {
        matches!(self.capability(Capability::SupportTakeOver), CapabilityValue::Flag(true))
    }
}

/// Layers `own` over `inherited` by name, preserving inherited order.
fn merge_params(
    node: &str,
    inherited: &[ParameterSpec],
    own: &[ParameterSpec],
) -> Result<Vec<ParameterSpec>> {
    let mut table = inherited.to_vec();

    for (i, spec) in own.iter().enumerate() {
        if own[..i].iter().any(|p| p.name() == spec.name()) {
            return Err(ConfigError::DuplicateParameter {
                node: node.to_string(),
                name: spec.name().to_string(),
            });
        }
        spec.validate_default()?;

        match table.iter().position(|p| p.name() == spec.name()) {
            Some(pos) => {
                let replacement = spec.clone().check_override(&table[pos], node)?;
                table[pos] = replacement;
            }
            None => table.push(spec.clone()),
        }
    }

    Ok(table)
}

/// Fluent declaration of a [`ConfigurationNode`].
#[derive(Debug)]
pub struct NodeBuilder {
    type_name: String,
    parent: Option<Arc<ConfigurationNode>>,
    binding: Option<Binding>,
    params: Vec<ParameterSpec>,
    capabilities: CapabilityTable,
}

impl NodeBuilder {
    /// Starts a declaration of `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            parent: None,
            binding: None,
            params: Vec::new(),
            capabilities: CapabilityTable::default(),
        }
    }

    /// Extends `parent`'s effective schema.
    #[must_use]
    pub fn extends(mut self, parent: &Arc<ConfigurationNode>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Sets the native binding.
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, header: impl Into<String>) -> Self {
        self.binding = Some(Binding::new(name, header));
        self
    }

    /// Appends a parameter declaration.
    #[must_use]
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declares the memory-mode query.
    #[must_use]
    pub fn memory_mode(mut self, f: MemoryModeFn) -> Self {
        self.capabilities.memory_mode = Some(f);
        self
    }

    /// Declares the cache-requirement query.
    #[must_use]
    pub fn require_caches(mut self, f: FlagFn) -> Self {
        self.capabilities.require_caches = Some(f);
        self
    }

    /// Declares the takeover-support query.
    #[must_use]
    pub fn support_take_over(mut self, f: FlagFn) -> Self {
        self.capabilities.support_take_over = Some(f);
        self
    }

    /// Finishes the declaration.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigurationNode::declare`].
    pub fn build(self) -> Result<Arc<ConfigurationNode>> {
        ConfigurationNode::declare_with(
            self.type_name,
            self.parent.as_ref(),
            self.binding,
            self.params,
            self.capabilities,
        )
    }
}
