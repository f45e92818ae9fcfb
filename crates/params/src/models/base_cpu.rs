//! `BaseCPU` schema.
//!
//! Parameters common to every CPU model. `BaseCPU` has no native binding of
//! its own: it only exists to be extended, and finalizing a bare `BaseCPU`
//! instance fails with a missing binding.

use std::sync::Arc;

use crate::common::Result;
use crate::config::defaults;
use crate::node::{ConfigurationNode, MemoryMode, NodeBuilder};
use crate::params::ParameterSpec;

/// Node type name.
pub const TYPE_NAME: &str = "BaseCPU";

const fn memory_mode(_: &ConfigurationNode) -> MemoryMode {
    MemoryMode::Invalid
}

const fn never(_: &ConfigurationNode) -> bool {
    false
}

/// Declares `BaseCPU`.
///
/// # Errors
///
/// Any [`ConfigurationNode::declare`] error.
pub fn declare() -> Result<Arc<ConfigurationNode>> {
    NodeBuilder::new(TYPE_NAME)
        .memory_mode(memory_mode)
        .require_caches(never)
        .support_take_over(never)
        .param(ParameterSpec::uint("numThreads", 1, "Number of hardware thread contexts"))
        .param(ParameterSpec::int("cpu_id", -1, "CPU identifier"))
        .param(ParameterSpec::uint("socket_id", 0, "Physical socket identifier"))
        .param(ParameterSpec::boolean("function_trace", false, "Enable function trace"))
        .param(ParameterSpec::uint("function_trace_start", 0, "Tick to start function trace"))
        .param(ParameterSpec::boolean("do_checkpoint_insts", true, "Enable checkpoint instructions"))
        .param(ParameterSpec::boolean("do_statistics_insts", true, "Enable statistics pseudo instructions"))
        .param(ParameterSpec::uint("max_insts_any_thread", 0, "Terminate when any thread reaches this instruction count"))
        .param(ParameterSpec::uint("max_insts_all_threads", 0, "Terminate when all threads have reached this instruction count"))
        .param(ParameterSpec::cycles("syscallRetryLatency", defaults::SYSCALL_RETRY_LATENCY, "Time to wait before retrying a blocked syscall"))
        .param(ParameterSpec::cycles("pwr_gating_latency", defaults::PWR_GATING_LATENCY, "Latency to enter power gating state when all threads are idle"))
        .param(ParameterSpec::boolean("power_gating_on_idle", false, "Power gate the core when idle"))
        .build()
}
