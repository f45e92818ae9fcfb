//! Built-in model catalog.
//!
//! The catalog declares every enumeration and node type the simulator ships
//! with, once, at process start:
//! 1. **Enumerations:** `SMTFetchPolicy`, `SMTQueuePolicy` (shared by the IQ, LSQ and ROB policies), `CommitPolicy`.
//! 2. **CPU models:** The abstract `BaseCPU` and the out-of-order `BaseO3CPU` extending it.
//! 3. **Collaborators:** Functional-unit pools and branch predictors referenced by the CPU.
//!
//! Declared schemas are immutable; use [`Catalog::global`] to share one catalog.

/// `BaseCPU`, the abstract parent of every CPU model.
pub mod base_cpu;

/// Branch predictor schemas.
pub mod branch_pred;

/// Functional-unit pool schemas.
pub mod fu_pool;

/// The out-of-order CPU model.
pub mod o3;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::common::{ConfigError, Result};
use crate::enums::EnumRegistry;
use crate::node::ConfigurationNode;

/// SMT fetch policy enumeration name.
pub const SMT_FETCH_POLICY: &str = "SMTFetchPolicy";

/// SMT queue sharing policy enumeration name.
pub const SMT_QUEUE_POLICY: &str = "SMTQueuePolicy";

/// SMT commit policy enumeration name.
pub const COMMIT_POLICY: &str = "CommitPolicy";

static GLOBAL: OnceLock<Catalog> = OnceLock::new();

/// Every built-in enumeration and node type.
#[derive(Debug)]
pub struct Catalog {
    enums: EnumRegistry,
    nodes: BTreeMap<String, Arc<ConfigurationNode>>,
}

impl Catalog {
    /// Declares the built-in enumerations and node types.
    ///
    /// # Errors
    ///
    /// Any declaration error; the built-in schemas declare cleanly, so an
    /// error here indicates a broken model definition.
    pub fn build() -> Result<Self> {
        let mut enums = EnumRegistry::new();
        let fetch = enums.define_enum(SMT_FETCH_POLICY, &["RoundRobin", "Branch", "IQCount", "LSQCount"])?;
        let queue = enums.define_enum(SMT_QUEUE_POLICY, &["Dynamic", "Partitioned", "Threshold"])?;
        let commit = enums.define_enum(COMMIT_POLICY, &["RoundRobin", "OldestReady"])?;

        let cpu = base_cpu::declare()?;
        let pool = fu_pool::declare()?;
        let default_pool = fu_pool::declare_default(&pool)?;
        let predictor = branch_pred::declare()?;
        let tournament = branch_pred::declare_tournament(&predictor)?;
        let core = o3::declare(&o3::O3Deps {
            base_cpu: &cpu,
            default_fu_pool: &default_pool,
            tournament: &tournament,
            fetch_policy: &fetch,
            queue_policy: &queue,
            commit_policy: &commit,
        })?;

        let nodes: BTreeMap<String, Arc<ConfigurationNode>> =
            [cpu, core, pool, default_pool, predictor, tournament]
                .into_iter()
                .map(|n| (n.type_name().to_string(), n))
                .collect();

        debug!(enums = enums.len(), nodes = nodes.len(), "built model catalog");
        Ok(Self { enums, nodes })
    }

    /// Process-wide catalog, built on first use.
    ///
    /// # Errors
    ///
    /// As [`Catalog::build`], on the first call only.
    pub fn global() -> Result<&'static Self> {
        if let Some(catalog) = GLOBAL.get() {
            return Ok(catalog);
        }
        let built = Self::build()?;
        Ok(GLOBAL.get_or_init(|| built))
    }

    /// Enumeration registry.
    pub const fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// Node type by name.
    pub fn node(&self, type_name: &str) -> Option<&Arc<ConfigurationNode>> {
        self.nodes.get(type_name)
    }

    /// Node type by name, as an error when absent.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownNodeType`] if no such node is declared.
    pub fn require(&self, type_name: &str) -> Result<&Arc<ConfigurationNode>> {
        self.node(type_name).ok_or_else(|| ConfigError::UnknownNodeType {
            name: type_name.to_string(),
        })
    }

    /// Every node type in name order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<ConfigurationNode>> {
        self.nodes.values()
    }
}
