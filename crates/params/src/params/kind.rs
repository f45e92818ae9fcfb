//! Parameter kinds and validation.
//!
//! Validation never coerces: a value is accepted only when its representation
//! matches the kind, or when a change of representation is lossless (a
//! non-negative signed literal for an unsigned kind, for example). Integers
//! outside the kind's range are rejected rather than truncated.

use std::fmt;
use std::sync::Arc;

use crate::common::{ConfigError, Result};
use crate::enums::EnumType;
use crate::params::value::{Cycles, Value};

/// Largest value accepted by [`ParamKind::UInt`] (native 32-bit unsigned).
pub const UINT_MAX: u64 = u32::MAX as u64;

/// Smallest value accepted by [`ParamKind::Int`] (native 32-bit signed).
pub const INT_MIN: i64 = i32::MIN as i64;

/// Largest value accepted by [`ParamKind::Int`] (native 32-bit signed).
pub const INT_MAX: i64 = i32::MAX as i64;

/// Declared kind of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// 32-bit unsigned integer.
    UInt,
    /// 32-bit signed integer.
    Int,
    /// Boolean flag.
    Bool,
    /// Non-negative duration in clock cycles.
    CycleCount,
    /// Member of the given scoped enumeration.
    Enum(Arc<EnumType>),
    /// Instance of the named node type, or of a type extending it.
    ObjectRef(String),
}

impl ParamKind {
    /// Checks `value` against this kind and returns it in canonical form.
    ///
    /// Canonical form means `UInt` for unsigned kinds, `Int` for signed kinds
    /// and `Cycles` for cycle counts, so two values that validate equal also
    /// compare equal.
    ///
    /// # Arguments
    ///
    /// * `param` - Parameter name, reported in the error.
    /// * `value` - Candidate value. References are not concrete and never pass.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TypeMismatch`] naming the parameter, the expected kind
    /// and the received value.
    pub fn check(&self, param: &str, value: Value) -> Result<Value> {
        let accepted = match (self, value) {
            (Self::UInt, Value::UInt(v)) if v <= UINT_MAX => Value::UInt(v),
            (Self::UInt, Value::Int(v)) if (0..=UINT_MAX as i64).contains(&v) => {
                Value::UInt(v.unsigned_abs())
            }
            (Self::Int, Value::Int(v)) if (INT_MIN..=INT_MAX).contains(&v) => Value::Int(v),
            (Self::Int, Value::UInt(v)) if v <= INT_MAX as u64 => Value::Int(v as i64),
            (Self::Bool, v @ Value::Bool(_)) => v,
            (Self::CycleCount, v @ Value::Cycles(_)) => v,
            (Self::CycleCount, Value::UInt(v)) => Value::Cycles(Cycles(v)),
            (Self::CycleCount, Value::Int(v)) if v >= 0 => Value::Cycles(Cycles(v.unsigned_abs())),
            (Self::Enum(ty), Value::Enum(variant)) if ty.contains(&variant) => Value::Enum(variant),
            (Self::ObjectRef(ty), Value::Object(inst)) if inst.node().is_a(ty) => {
                Value::Object(inst)
            }
            (_, other) => return Err(self.mismatch(param, &other)),
        };
        Ok(accepted)
    }

    /// Builds the mismatch error for `value`.
    pub(crate) fn mismatch(&self, param: &str, value: &Value) -> ConfigError {
        ConfigError::mismatch(param, self, format_args!("{value} ({})", value.describe()))
    }

    /// Whether this kind holds child instances.
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::ObjectRef(_))
    }

    /// The enumeration of an enum kind.
    pub const fn enum_type(&self) -> Option<&Arc<EnumType>> {
        match self {
            Self::Enum(ty) => Some(ty),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt => write!(f, "unsigned (0..={UINT_MAX})"),
            Self::Int => write!(f, "int ({INT_MIN}..={INT_MAX})"),
            Self::Bool => write!(f, "bool"),
            Self::CycleCount => write!(f, "cycles"),
            Self::Enum(ty) => write!(f, "{ty}"),
            Self::ObjectRef(ty) => write!(f, "{ty} object"),
        }
    }
}

/// Validates `value` against `kind` for the parameter `param`.
///
/// # Errors
///
/// [`ConfigError::TypeMismatch`] when the value does not match the kind.
pub fn validate(kind: &ParamKind, param: &str, value: &Value) -> Result<()> {
    kind.check(param, value.clone()).map(|_| ())
}
