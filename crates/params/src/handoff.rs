//! Native handoff table.
//!
//! A [`FrozenConfiguration`] is the immutable result of finalizing an
//! instance tree and the only form in which values reach the native runtime.
//! Each frozen node carries:
//! 1. **Identity:** Instance path, model type name, and the native binding (name + header).
//! 2. **Values:** A `(name, value)` table in effective-schema order.
//! 3. **Children:** The frozen instances held by object parameters; the parameter itself
//!    records only the child's binding name and path.
//!
//! Frozen trees are shared via `Arc` and are safe to read from any thread.

use std::sync::Arc;

use serde::Serialize;

use crate::common::Result;
use crate::node::Binding;

/// A bound, validated parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum FrozenValue {
    /// Unsigned integer.
    #[serde(rename = "uint")]
    UInt(u64),
    /// Signed integer.
    #[serde(rename = "int")]
    Int(i64),
    /// Boolean.
    #[serde(rename = "bool")]
    Bool(bool),
    /// Cycle count.
    #[serde(rename = "cycles")]
    Cycles(u64),
    /// Enumeration variant.
    #[serde(rename = "enum")]
    Enum {
        /// Enumeration the variant belongs to.
        enumeration: String,
        /// Variant name.
        variant: String,
        /// Position of the variant in the enumeration.
        ordinal: usize,
    },
    /// Child instance, identified by its binding and path.
    #[serde(rename = "object")]
    Object {
        /// Binding name of the child's native type.
        binding: String,
        /// Instance path of the child.
        path: String,
    },
}

/// One entry of the handoff table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FrozenParam {
    name: String,
    value: FrozenValue,
}

impl FrozenParam {
    pub(crate) fn new(name: impl Into<String>, value: FrozenValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound value.
    pub const fn value(&self) -> &FrozenValue {
        &self.value
    }
}

/// Immutable snapshot of a finalized instance and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrozenConfiguration {
    path: String,
    type_name: String,
    binding: Binding,
    params: Vec<FrozenParam>,
    children: Vec<Arc<FrozenConfiguration>>,
}

impl FrozenConfiguration {
    pub(crate) fn new(
        path: String,
        type_name: impl Into<String>,
        binding: Binding,
        params: Vec<FrozenParam>,
        children: Vec<Arc<Self>>,
    ) -> Self {
        Self {
            path,
            type_name: type_name.into(),
            binding,
            params,
            children,
        }
    }

    /// Instance path (`BaseO3CPU`, `BaseO3CPU.branchPred`, ...).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Model type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Native binding receiving these values.
    pub const fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Handoff table in effective-schema order.
    pub fn params(&self) -> &[FrozenParam] {
        &self.params
    }

    /// Frozen children in the order their object parameters are declared.
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    /// Bound value of `name`.
    pub fn get(&self, name: &str) -> Option<&FrozenValue> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Unsigned value of `name`.
    pub fn uint(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            FrozenValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Signed value of `name`.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            FrozenValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value of `name`.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            FrozenValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Cycle count of `name`.
    pub fn cycles(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            FrozenValue::Cycles(v) => Some(*v),
            _ => None,
        }
    }

    /// Enum variant of `name`.
    pub fn variant(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FrozenValue::Enum { variant, .. } => Some(variant),
            _ => None,
        }
    }

    /// Frozen child held by object parameter `name`.
    pub fn child(&self, name: &str) -> Option<&Arc<Self>> {
        match self.get(name)? {
            FrozenValue::Object { path, .. } => self.children.iter().find(|c| &c.path == path),
            _ => None,
        }
    }

    /// This node followed by every descendant, depth-first in declaration order.
    pub fn flatten(&self) -> Vec<&Self> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.flatten());
        }
        out
    }

    /// Serializes the tree as the JSON handoff document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`](crate::ConfigError::Json) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
