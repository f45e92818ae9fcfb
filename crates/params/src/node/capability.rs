//! Capability queries.
//!
//! Capabilities are fixed facts about a model family that the build/launch
//! harness consults before it creates anything: which memory-access mode the
//! model needs, whether it needs caches, and whether it can take over from a
//! running core. They are plain functions of the node *type*, so they can be
//! evaluated without an instance and cannot observe override state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ConfigurationNode;

/// Memory-access timing mode a model requires from the memory system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryMode {
    /// No usable mode; the node cannot drive memory by itself.
    Invalid,
    /// Accesses complete immediately with an estimated latency.
    Atomic,
    /// Accesses are split into timed request/response transactions.
    Timing,
    /// Atomic accesses that bypass caches.
    AtomicNoncaching,
}

impl MemoryMode {
    /// Name used by the launch harness.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Atomic => "atomic",
            Self::Timing => "timing",
            Self::AtomicNoncaching => "atomic_noncaching",
        }
    }
}

impl fmt::Display for MemoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the capability queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Required memory-access timing mode.
    MemoryMode,
    /// Whether caches must be attached.
    RequireCaches,
    /// Whether the node can take over from another running core.
    SupportTakeOver,
}

impl Capability {
    /// Every capability, in a fixed order.
    pub const ALL: [Self; 3] = [Self::MemoryMode, Self::RequireCaches, Self::SupportTakeOver];

    /// Query name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MemoryMode => "memory_mode",
            Self::RequireCaches => "require_caches",
            Self::SupportTakeOver => "support_take_over",
        }
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown capability '{s}'"))
    }
}

/// Answer to a capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    /// Answer of [`Capability::MemoryMode`].
    MemoryMode(MemoryMode),
    /// Answer of a yes/no capability.
    Flag(bool),
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemoryMode(m) => write!(f, "{m}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Memory-mode query function.
pub type MemoryModeFn = fn(&ConfigurationNode) -> MemoryMode;

/// Yes/no query function.
pub type FlagFn = fn(&ConfigurationNode) -> bool;

/// Capability functions declared by one node layer.
///
/// Unset entries fall back to the nearest ancestor that sets them.
#[derive(Clone, Copy, Default)]
pub struct CapabilityTable {
    pub(crate) memory_mode: Option<MemoryModeFn>,
    pub(crate) require_caches: Option<FlagFn>,
    pub(crate) support_take_over: Option<FlagFn>,
}

impl CapabilityTable {
    /// Whether this layer declares its own function for `cap`.
    pub const fn declares(&self, cap: Capability) -> bool {
        match cap {
            Capability::MemoryMode => self.memory_mode.is_some(),
            Capability::RequireCaches => self.require_caches.is_some(),
            Capability::SupportTakeOver => self.support_take_over.is_some(),
        }
    }
}

impl fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declared: Vec<&str> = Capability::ALL
            .into_iter()
            .filter(|c| self.declares(*c))
            .map(Capability::name)
            .collect();
        f.debug_struct("CapabilityTable")
            .field("declared", &declared)
            .finish()
    }
}

/// Answer used when no layer of a node's ancestry declares the capability.
pub(crate) const fn fallback(cap: Capability) -> CapabilityValue {
    match cap {
        Capability::MemoryMode => CapabilityValue::MemoryMode(MemoryMode::Invalid),
        Capability::RequireCaches | Capability::SupportTakeOver => CapabilityValue::Flag(false),
    }
}
