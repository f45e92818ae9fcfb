//! Override documents and default constants.
//!
//! This module holds the configuration surface that sits in front of the schemas:
//! 1. **Defaults:** Named baseline values of the built-in models.
//! 2. **Overrides:** A JSON document of parameter overrides, applied to an instance before finalize.
//!
//! Override documents are produced by configuration scripts (directly as JSON,
//! or from a Python dict via the bindings) and map parameter names to values:
//!
//! ```
//! use o3cfg_core::{Catalog, Overrides};
//!
//! let catalog = Catalog::build().unwrap();
//! let mut cpu = catalog.node("BaseO3CPU").unwrap().instantiate();
//!
//! let overrides = Overrides::from_json(r#"{
//!     "fetchWidth": 8,
//!     "smtFetchPolicy": "IQCount",
//!     "numThreads": 2,
//!     "branchPred": { "BTBEntries": 2048 }
//! }"#).unwrap();
//! overrides.apply_to(&mut cpu).unwrap();
//!
//! let frozen = cpu.finalize().unwrap();
//! assert_eq!(frozen.uint("fetchWidth"), Some(8));
//! assert_eq!(frozen.child("branchPred").unwrap().uint("numThreads"), Some(2));
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::common::Result;
use crate::instance::ConfigurationInstance;
use crate::params::{Reference, Value};

/// Default values of the built-in models.
///
/// These are the values a core receives when a configuration script does not
/// override them.
pub mod defaults {
    /// Superscalar width of every pipeline stage (fetch through commit and squash).
    pub const PIPELINE_WIDTH: u32 = 12;

    /// Latency between adjacent pipeline stages, in cycles.
    pub const STAGE_DELAY: u64 = 1;

    /// Rename to issue/execute/writeback latency, in cycles.
    pub const RENAME_TO_IEW_DELAY: u64 = 2;

    /// Cycles from a trap being raised to the pipeline redirecting.
    pub const TRAP_LATENCY: u64 = 13;

    /// Cycles for a fetch-side trap.
    pub const FETCH_TRAP_LATENCY: u64 = 1;

    /// Cache ports available to loads, and separately to stores.
    pub const CACHE_PORTS: u32 = 200;

    /// Fetch buffer size in bytes.
    pub const FETCH_BUFFER_SIZE: u32 = 64;

    /// Fetch queue size in micro-ops, per thread.
    pub const FETCH_QUEUE_SIZE: u32 = 32;

    /// Time buffer depth for forward and backward stage communication.
    pub const TIME_BUFFER_SIZE: u32 = 5;

    /// Load queue entries.
    pub const LQ_ENTRIES: u32 = 48;

    /// Store queue entries.
    pub const SQ_ENTRIES: u32 = 48;

    /// Address shift applied before LSQ dependence checks.
    pub const LSQ_DEP_CHECK_SHIFT: u32 = 4;

    /// Memory instructions between store-set predictor invalidations.
    pub const STORE_SET_CLEAR_PERIOD: u32 = 62464;

    /// Last-fetched-store table and store-set ID table size.
    pub const STORE_SET_TABLE_SIZE: u32 = 192;

    /// Physical integer, floating-point and vector registers.
    pub const PHYS_REGS: u32 = 256;

    /// Physical vector predicate registers.
    pub const PHYS_VEC_PRED_REGS: u32 = 32;

    /// Instruction queue entries.
    pub const IQ_ENTRIES: u32 = 384;

    /// Reorder buffer entries.
    pub const ROB_ENTRIES: u32 = 1024;

    /// Threshold used by the `Threshold` SMT sharing policy.
    pub const SMT_THRESHOLD: i32 = 100;

    /// Cycles before a blocked syscall is retried.
    pub const SYSCALL_RETRY_LATENCY: u64 = 10000;

    /// Cycles of idleness before the core is power gated.
    pub const PWR_GATING_LATENCY: u64 = 300;

    /// Branch target buffer entries.
    pub const BTB_ENTRIES: u32 = 4096;

    /// Branch target buffer tag bits.
    pub const BTB_TAG_SIZE: u32 = 16;

    /// Return address stack entries.
    pub const RAS_SIZE: u32 = 16;

    /// Bits the PC is shifted right before indexing predictor tables.
    pub const INST_SHIFT_AMT: u32 = 2;

    /// Tournament local predictor and local history table size.
    pub const TOURNAMENT_LOCAL_SIZE: u32 = 2048;

    /// Tournament global and choice predictor size.
    pub const TOURNAMENT_GLOBAL_SIZE: u32 = 8192;

    /// Saturating counter width of every tournament table.
    pub const TOURNAMENT_CTR_BITS: u32 = 2;
}

/// A single override value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    /// Boolean literal.
    Bool(bool),
    /// Non-negative integer literal.
    UInt(u64),
    /// Negative integer literal.
    Int(i64),
    /// `{"ref": "Parent.numThreads"}`.
    Reference(ReferenceOverride),
    /// Enumeration variant name.
    Variant(String),
    /// Overrides for the child instance held by an object parameter.
    Nested(Overrides),
}

/// Reference override object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceOverride {
    /// Reference text, `Self.<param>` or `Parent.<param>`.
    #[serde(rename = "ref")]
    pub target: String,
}

/// A set of parameter overrides keyed by parameter name.
///
/// Keys are applied in sorted order, so applying the same document always
/// produces the same instance and reports the same first error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Overrides(BTreeMap<String, OverrideValue>);

impl Overrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an override document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`](crate::ConfigError::Json) if the text is not a
    /// valid override document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds or replaces one override.
    pub fn insert(&mut self, name: impl Into<String>, value: OverrideValue) {
        let _ = self.0.insert(name.into(), value);
    }

    /// Number of top-level overrides.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies every override to `instance`, recursing into child instances
    /// for nested documents.
    ///
    /// The document is applied as a whole: if any key fails, `instance` is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// The first error raised by [`ConfigurationInstance::set`],
    /// [`ConfigurationInstance::child_mut`] or reference parsing.
    pub fn apply_to(&self, instance: &mut ConfigurationInstance) -> Result<()> {
        let mut staged = instance.clone();
        self.apply_each(&mut staged)?;
        *instance = staged;
        Ok(())
    }

    fn apply_each(&self, instance: &mut ConfigurationInstance) -> Result<()> {
        for (name, value) in &self.0 {
            debug!(node = instance.type_name(), param = %name, "applying override");
            match value {
                OverrideValue::Nested(nested) => nested.apply_each(instance.child_mut(name)?)?,
                OverrideValue::Reference(r) => {
                    let reference: Reference = r.target.parse()?;
                    instance.set(name, reference)?;
                }
                OverrideValue::Bool(v) => instance.set(name, *v)?,
                OverrideValue::UInt(v) => instance.set(name, *v)?,
                OverrideValue::Int(v) => instance.set(name, *v)?,
                OverrideValue::Variant(v) => instance.set(name, Value::Enum(v.clone()))?,
            }
        }
        Ok(())
    }
}
