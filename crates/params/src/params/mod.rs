//! Parameter type system.
//!
//! This module defines what a parameter is and what it may hold. It provides:
//! 1. **Kinds:** [`ParamKind`] and the [`validate`] contract that checks a value against a kind.
//! 2. **Values:** [`Value`] literals, [`Cycles`], and deferred [`Reference`] expressions.
//! 3. **Declarations:** [`ParameterSpec`], a named, typed, documented parameter with a default.

/// Parameter kinds and validation.
pub mod kind;

/// Parameter declarations.
pub mod spec;

/// Literal values and deferred references.
pub mod value;

pub use kind::{ParamKind, validate};
pub use spec::ParameterSpec;
pub use value::{Cycles, RefTarget, Reference, Value};
