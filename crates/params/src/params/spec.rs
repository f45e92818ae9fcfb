//! Parameter declarations.

use std::sync::Arc;

use crate::common::{ConfigError, Result};
use crate::enums::EnumType;
use crate::instance::ConfigurationInstance;
use crate::params::kind::ParamKind;
use crate::params::value::{Cycles, Value};

/// A named, typed parameter with a default value and a description.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    kind: ParamKind,
    default: Value,
    description: String,
}

impl ParameterSpec {
    /// Creates a declaration with an arbitrary kind and default.
    ///
    /// The default is checked when the owning node is declared, not here.
    pub fn new(
        name: impl Into<String>,
        kind: ParamKind,
        default: impl Into<Value>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            default: default.into(),
            description: description.into(),
        }
    }

    /// Unsigned parameter.
    pub fn uint(name: impl Into<String>, default: u32, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::UInt, default, description)
    }

    /// Signed parameter.
    pub fn int(name: impl Into<String>, default: i32, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Int, default, description)
    }

    /// Boolean parameter.
    pub fn boolean(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Bool, default, description)
    }

    /// Cycle-count parameter.
    pub fn cycles(name: impl Into<String>, default: u64, description: impl Into<String>) -> Self {
        Self::new(name, ParamKind::CycleCount, Cycles(default), description)
    }

    /// Enumeration parameter; `default` is a variant name of `ty`.
    pub fn enumeration(
        name: impl Into<String>,
        ty: &Arc<EnumType>,
        default: &str,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, ParamKind::Enum(Arc::clone(ty)), default, description)
    }

    /// Object-reference parameter whose default is a fresh copy of `default`
    /// for every instantiation.
    pub fn object(
        name: impl Into<String>,
        node_type: impl Into<String>,
        default: ConfigurationInstance,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, ParamKind::ObjectRef(node_type.into()), default, description)
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub const fn kind(&self) -> &ParamKind {
        &self.kind
    }

    /// Schema default.
    pub const fn default_value(&self) -> &Value {
        &self.default
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks the default against the declared kind.
    ///
    /// A reference default is deferred to finalize, except that object
    /// parameters never accept references.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TypeMismatch`] when the default does not match the kind.
    pub fn validate_default(&self) -> Result<()> {
        match &self.default {
            Value::Ref(_) if self.kind.is_object() => {
                Err(self.kind.mismatch(&self.name, &self.default))
            }
            Value::Ref(_) => Ok(()),
            other => self.kind.check(&self.name, other.clone()).map(|_| ()),
        }
    }

    /// Accepts `self` as an override of `inherited` only if the kind is unchanged.
    pub(crate) fn check_override(self, inherited: &Self, node: &str) -> Result<Self> {
        if self.kind == inherited.kind {
            Ok(self)
        } else {
            Err(ConfigError::mismatch(
                format!("{node}.{}", self.name),
                &inherited.kind,
                format_args!("redeclaration as {}", self.kind),
            ))
        }
    }
}
