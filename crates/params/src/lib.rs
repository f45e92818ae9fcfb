//! Parameter schemas for out-of-order CPU timing models.
//!
//! This crate implements the typed configuration layer a cycle-level simulator
//! consumes before it builds a core. It provides:
//! 1. **Parameters:** Primitive kinds (unsigned, signed, bool, cycles, scoped enum, object) with validation.
//! 2. **Enumerations:** Closed, independently namespaced variant sets.
//! 3. **Nodes:** Named schemas layered over a parent schema, with native bindings and capability queries.
//! 4. **Instances:** Per-core value sets with overrides, reference resolution, and a one-shot finalize.
//! 5. **Models:** The built-in catalog (`BaseCPU`, `BaseO3CPU`, functional-unit pools, branch predictors).
//!
//! The frozen result of a finalize is the only thing handed to the native runtime.

/// Error taxonomy shared by every fallible operation.
pub mod common;
/// Override documents and named default constants.
pub mod config;
/// Scoped enumeration types and the enumeration registry.
pub mod enums;
/// Frozen configurations and the native handoff table.
pub mod handoff;
/// Mutable per-core value sets and finalization.
pub mod instance;
/// Built-in model catalog.
pub mod models;
/// Node schemas, inheritance, and capability queries.
pub mod node;
/// Parameter kinds, values, references, and declarations.
pub mod params;
/// Cross-node reference resolution.
pub mod resolver;

pub use crate::common::{ConfigError, Result};
pub use crate::config::Overrides;
pub use crate::enums::{EnumRegistry, EnumType};
pub use crate::handoff::{FrozenConfiguration, FrozenValue};
pub use crate::instance::ConfigurationInstance;
pub use crate::models::Catalog;
pub use crate::node::{Binding, ConfigurationNode, MemoryMode, NodeBuilder};
pub use crate::params::{Cycles, ParamKind, ParameterSpec, RefTarget, Reference, Value, validate};
