//! Parameter values.
//!
//! A [`Value`] is either a literal (integer, bool, cycle count, enum variant,
//! child instance) or a [`Reference`] that is bound to a concrete value only
//! when the owning instance tree is finalized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, Result};
use crate::instance::ConfigurationInstance;

/// A duration measured in simulated clock cycles.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cycles(pub u64);

impl Cycles {
    /// Raw cycle count.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycles", self.0)
    }
}

impl From<u64> for Cycles {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

/// Which instance a [`Reference`] reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefTarget {
    /// The instance holding the reference (`Self.<param>`).
    This,
    /// The nearest enclosing instance whose schema declares the parameter
    /// (`Parent.<param>`).
    Parent,
}

impl RefTarget {
    /// Keyword used in reference text.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::This => "Self",
            Self::Parent => "Parent",
        }
    }
}

/// A deferred value: "read parameter `param` from `target`".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    target: RefTarget,
    param: String,
}

impl Reference {
    /// Reference to a parameter of the nearest enclosing instance that declares it.
    pub fn parent(param: impl Into<String>) -> Self {
        Self {
            target: RefTarget::Parent,
            param: param.into(),
        }
    }

    /// Reference to another parameter of the same instance.
    pub fn this(param: impl Into<String>) -> Self {
        Self {
            target: RefTarget::This,
            param: param.into(),
        }
    }

    /// Where the reference looks.
    pub const fn target(&self) -> RefTarget {
        self.target
    }

    /// Parameter name read from the target.
    pub fn param(&self) -> &str {
        &self.param
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target.keyword(), self.param)
    }
}

impl FromStr for Reference {
    type Err = ConfigError;

    /// Parses `Self.<param>` or `Parent.<param>`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidReference {
            text: s.to_string(),
        };
        let (head, param) = s.trim().split_once('.').ok_or_else(invalid)?;
        if param.is_empty() || param.contains('.') {
            return Err(invalid());
        }
        match head {
            "Self" => Ok(Self::this(param)),
            "Parent" => Ok(Self::parent(param)),
            _ => Err(invalid()),
        }
    }
}

/// A parameter value as stored on a configuration instance.
#[derive(Debug, Clone)]
pub enum Value {
    /// Unsigned integer literal.
    UInt(u64),
    /// Signed integer literal.
    Int(i64),
    /// Boolean literal.
    Bool(bool),
    /// Cycle count literal.
    Cycles(Cycles),
    /// Enumeration variant name; the enumeration comes from the parameter's kind.
    Enum(String),
    /// Child configuration instance held by an object-reference parameter.
    Object(Box<ConfigurationInstance>),
    /// Deferred reference, bound at finalize.
    Ref(Reference),
}

impl Value {
    /// Short description of the value's representation, used in mismatch errors.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::UInt(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::Bool(_) => "bool",
            Self::Cycles(_) => "cycle count",
            Self::Enum(_) => "enum variant",
            Self::Object(_) => "object",
            Self::Ref(_) => "reference",
        }
    }

    /// Whether the value is a deferred reference.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    /// Child instance, if this is an object value.
    pub fn as_object(&self) -> Option<&ConfigurationInstance> {
        match self {
            Self::Object(inst) => Some(inst),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Cycles(a), Self::Cycles(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Ref(a), Self::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Cycles(c) => write!(f, "{c}"),
            Self::Enum(v) => write!(f, "'{v}'"),
            Self::Object(inst) => write!(f, "<{} instance>", inst.type_name()),
            Self::Ref(r) => write!(f, "{r}"),
        }
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Cycles> for Value {
    fn from(v: Cycles) -> Self {
        Self::Cycles(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Enum(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Enum(v)
    }
}

impl From<Reference> for Value {
    fn from(r: Reference) -> Self {
        Self::Ref(r)
    }
}

impl From<ConfigurationInstance> for Value {
    fn from(inst: ConfigurationInstance) -> Self {
        Self::Object(Box::new(inst))
    }
}
