//! Configuration error definitions.
//!
//! This module defines the single error type for the parameter system. It covers:
//! 1. **Schema errors:** Malformed enumerations, duplicate or retyped parameters, incomplete bindings.
//! 2. **Override errors:** Unknown parameter names and values that do not match the declared kind.
//! 3. **Finalize errors:** Unresolved or cyclic references and nodes without a native binding.
//!
//! All errors are terminal for the affected instance; each names exactly one root cause.

use std::fmt;

use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while declaring schemas or configuring and finalizing instances.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A set, override, or reference named a parameter absent from the effective schema.
    #[error("unknown parameter '{name}' on {node}")]
    UnknownParameter {
        /// Node type or instance path that was searched.
        node: String,
        /// The parameter name that was not found.
        name: String,
    },

    /// A value's representation does not match the declared kind.
    ///
    /// Also covers enum variants outside the enumeration's set and integers
    /// outside the kind's range; values are never coerced.
    #[error("type mismatch for '{param}': expected {expected}, got {received}")]
    TypeMismatch {
        /// Parameter (or `path.param`) being assigned.
        param: String,
        /// Human-readable expected kind.
        expected: String,
        /// Human-readable received value.
        received: String,
    },

    /// A reference points at a node or parameter missing from the instance tree.
    #[error("unresolved reference {reference} from {path}.{param}")]
    UnresolvedReference {
        /// Instance path holding the reference.
        path: String,
        /// Parameter holding the reference.
        param: String,
        /// The reference expression.
        reference: String,
    },

    /// A reference chain revisited a parameter already on the resolution path.
    #[error("cyclic reference: {}", .cycle.join(" -> "))]
    CyclicReference {
        /// The `path.param` entries of the cycle, first entry repeated at the end.
        cycle: Vec<String>,
    },

    /// A node that must back a live component has no binding name/header.
    #[error("{type_name} at {path} has no native binding")]
    MissingBinding {
        /// Node type name.
        type_name: String,
        /// Instance path, or `<declaration>` when caught at declare time.
        path: String,
    },

    /// A variant name is not part of the named enumeration.
    #[error("'{variant}' is not a variant of {enum_name}")]
    UnknownVariant {
        /// Enumeration that was searched.
        enum_name: String,
        /// The variant name that was not found.
        variant: String,
    },

    /// An enumeration name is not registered.
    #[error("unknown enumeration '{name}'")]
    UnknownEnum {
        /// The enumeration name that was not found.
        name: String,
    },

    /// An enumeration definition is empty, repeats a variant, or reuses a name.
    #[error("invalid enumeration {name}: {reason}")]
    InvalidEnum {
        /// Enumeration being defined.
        name: String,
        /// What is wrong with the definition.
        reason: String,
    },

    /// A node type name is not present in the catalog.
    #[error("unknown node type '{name}'")]
    UnknownNodeType {
        /// The node type name that was not found.
        name: String,
    },

    /// A parameter name appears twice in the same declaration layer.
    #[error("duplicate parameter '{name}' in {node}")]
    DuplicateParameter {
        /// Node type being declared.
        node: String,
        /// The repeated parameter name.
        name: String,
    },

    /// The instance was already finalized and can no longer be mutated.
    #[error("{path} is finalized and can no longer be modified")]
    AlreadyFinalized {
        /// Instance path.
        path: String,
    },

    /// Reference text could not be parsed.
    #[error("invalid reference expression '{text}' (expected Self.<param> or Parent.<param>)")]
    InvalidReference {
        /// The offending text.
        text: String,
    },

    /// An override document or handoff table failed to (de)serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Builds a [`ConfigError::TypeMismatch`] from displayable parts.
    pub fn mismatch(
        param: impl Into<String>,
        expected: impl fmt::Display,
        received: impl fmt::Display,
    ) -> Self {
        Self::TypeMismatch {
            param: param.into(),
            expected: expected.to_string(),
            received: received.to_string(),
        }
    }

    /// Builds a [`ConfigError::UnknownParameter`].
    pub fn unknown_parameter(node: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownParameter {
            node: node.into(),
            name: name.into(),
        }
    }
}
