//! `BaseO3CPU` schema.
//!
//! The out-of-order core's parameter table, in the order the native model
//! reads it. Parameters fall into a few groups:
//! 1. **Stage widths and delays:** Per-stage superscalar widths and the inter-stage latencies
//!    carried by the time buffers.
//! 2. **Memory ordering:** Load/store queue sizes, dependence checking, and the store-set predictor.
//! 3. **Physical resources:** Register files, instruction queue, and reorder buffer capacities.
//! 4. **SMT policies:** Fetch, queue sharing, and commit policies with their thresholds.
//! 5. **Collaborators:** The functional-unit pool and branch predictor, each a child instance.
//!
//! The default branch predictor follows the core's thread count through a
//! `Parent.numThreads` reference, so overriding `numThreads` on the core also
//! sizes the predictor.

use std::sync::Arc;

use crate::common::Result;
use crate::config::defaults::{
    CACHE_PORTS, FETCH_BUFFER_SIZE, FETCH_QUEUE_SIZE, FETCH_TRAP_LATENCY, IQ_ENTRIES,
    LQ_ENTRIES, LSQ_DEP_CHECK_SHIFT, PHYS_REGS, PHYS_VEC_PRED_REGS, PIPELINE_WIDTH,
    RENAME_TO_IEW_DELAY, ROB_ENTRIES, SMT_THRESHOLD, SQ_ENTRIES, STAGE_DELAY,
    STORE_SET_CLEAR_PERIOD, STORE_SET_TABLE_SIZE, TIME_BUFFER_SIZE, TRAP_LATENCY,
};
use crate::enums::EnumType;
use crate::models::{branch_pred, fu_pool};
use crate::node::{ConfigurationNode, MemoryMode, NodeBuilder};
use crate::params::{ParameterSpec, Reference};

/// Node type name.
pub const TYPE_NAME: &str = "BaseO3CPU";

/// Already-declared schemas `BaseO3CPU` is built from.
#[derive(Debug)]
pub struct O3Deps<'a> {
    /// Parent schema.
    pub base_cpu: &'a Arc<ConfigurationNode>,
    /// Schema of the default `fuPool`.
    pub default_fu_pool: &'a Arc<ConfigurationNode>,
    /// Schema of the default `branchPred`.
    pub tournament: &'a Arc<ConfigurationNode>,
    /// `SMTFetchPolicy`.
    pub fetch_policy: &'a Arc<EnumType>,
    /// `SMTQueuePolicy`.
    pub queue_policy: &'a Arc<EnumType>,
    /// `CommitPolicy`.
    pub commit_policy: &'a Arc<EnumType>,
}

const fn memory_mode(_: &ConfigurationNode) -> MemoryMode {
    MemoryMode::Timing
}

const fn always(_: &ConfigurationNode) -> bool {
    true
}

fn stage_delay(name: &str, description: &str) -> ParameterSpec {
    ParameterSpec::cycles(name, STAGE_DELAY, description)
}

fn width(name: &str, description: &str) -> ParameterSpec {
    ParameterSpec::uint(name, PIPELINE_WIDTH, description)
}

/// Declares `BaseO3CPU`.
///
/// # Errors
///
/// Any [`ConfigurationNode::declare`] error, or a failure to seed the
/// default branch predictor's thread-count reference.
pub fn declare(deps: &O3Deps<'_>) -> Result<Arc<ConfigurationNode>> {
    let mut predictor = deps.tournament.instantiate();
    predictor.set("numThreads", Reference::parent("numThreads"))?;

    let queue = deps.queue_policy;

    NodeBuilder::new(TYPE_NAME)
        .extends(deps.base_cpu)
        .binding("o3::CPU", "cpu/o3/dyn_inst.hh")
        .memory_mode(memory_mode)
        .require_caches(always)
        .support_take_over(always)
        .param(ParameterSpec::uint("activity", 0, "Initial count"))
        .param(ParameterSpec::uint("cacheStorePorts", CACHE_PORTS, "Cache Ports. Constrains stores only."))
        .param(ParameterSpec::uint("cacheLoadPorts", CACHE_PORTS, "Cache Ports. Constrains loads only."))
        // fetch
        .param(stage_delay("decodeToFetchDelay", "Decode to fetch delay"))
        .param(stage_delay("renameToFetchDelay", "Rename to fetch delay"))
        .param(stage_delay("iewToFetchDelay", "Issue/Execute/Writeback to fetch delay"))
        .param(stage_delay("commitToFetchDelay", "Commit to fetch delay"))
        .param(width("fetchWidth", "Fetch width"))
        .param(ParameterSpec::uint("fetchBufferSize", FETCH_BUFFER_SIZE, "Fetch buffer size in bytes"))
        .param(ParameterSpec::uint("fetchQueueSize", FETCH_QUEUE_SIZE, "Fetch queue size in micro-ops per-thread"))
        // decode
        .param(stage_delay("renameToDecodeDelay", "Rename to decode delay"))
        .param(stage_delay("iewToDecodeDelay", "Issue/Execute/Writeback to decode delay"))
        .param(stage_delay("commitToDecodeDelay", "Commit to decode delay"))
        .param(stage_delay("fetchToDecodeDelay", "Fetch to decode delay"))
        .param(width("decodeWidth", "Decode width"))
        // rename
        .param(stage_delay("iewToRenameDelay", "Issue/Execute/Writeback to rename delay"))
        .param(stage_delay("commitToRenameDelay", "Commit to rename delay"))
        .param(stage_delay("decodeToRenameDelay", "Decode to rename delay"))
        .param(width("renameWidth", "Rename width"))
        // issue/execute/writeback
        .param(stage_delay("commitToIEWDelay", "Commit to Issue/Execute/Writeback delay"))
        .param(ParameterSpec::cycles("renameToIEWDelay", RENAME_TO_IEW_DELAY, "Rename to Issue/Execute/Writeback delay"))
        .param(stage_delay("issueToExecuteDelay", "Issue to execute delay (internal to the IEW stage)"))
        .param(width("dispatchWidth", "Dispatch width"))
        .param(width("issueWidth", "Issue width"))
        .param(width("wbWidth", "Writeback width"))
        .param(ParameterSpec::object("fuPool", fu_pool::TYPE_NAME, deps.default_fu_pool.instantiate(), "Functional Unit pool"))
        // commit
        .param(stage_delay("iewToCommitDelay", "Issue/Execute/Writeback to commit delay"))
        .param(stage_delay("renameToROBDelay", "Rename to reorder buffer delay"))
        .param(width("commitWidth", "Commit width"))
        .param(width("squashWidth", "Squash width"))
        .param(ParameterSpec::cycles("trapLatency", TRAP_LATENCY, "Trap latency"))
        .param(ParameterSpec::cycles("fetchTrapLatency", FETCH_TRAP_LATENCY, "Fetch trap latency"))
        .param(ParameterSpec::uint("backComSize", TIME_BUFFER_SIZE, "Time buffer size for backwards communication"))
        .param(ParameterSpec::uint("forwardComSize", TIME_BUFFER_SIZE, "Time buffer size for forward communication"))
        // load/store queue
        .param(ParameterSpec::uint("LQEntries", LQ_ENTRIES, "Number of load queue entries"))
        .param(ParameterSpec::uint("SQEntries", SQ_ENTRIES, "Number of store queue entries"))
        .param(ParameterSpec::uint("LSQDepCheckShift", LSQ_DEP_CHECK_SHIFT, "Number of places to shift addr before check"))
        .param(ParameterSpec::boolean("LSQCheckLoads", true, "Should dependency violations be checked for loads & stores or just stores"))
        .param(ParameterSpec::uint("store_set_clear_period", STORE_SET_CLEAR_PERIOD, "Number of load/store insts before the dep predictor should be invalidated"))
        .param(ParameterSpec::uint("LFSTSize", STORE_SET_TABLE_SIZE, "Last fetched store table size"))
        .param(ParameterSpec::uint("SSITSize", STORE_SET_TABLE_SIZE, "Store set ID table size"))
        // physical resources
        .param(ParameterSpec::uint("numRobs", 1, "Number of Reorder Buffers"))
        .param(ParameterSpec::uint("numPhysIntRegs", PHYS_REGS, "Number of physical integer registers"))
        .param(ParameterSpec::uint("numPhysFloatRegs", PHYS_REGS, "Number of physical floating point registers"))
        .param(ParameterSpec::uint("numPhysVecRegs", PHYS_REGS, "Number of physical vector registers"))
        .param(ParameterSpec::uint("numPhysVecPredRegs", PHYS_VEC_PRED_REGS, "Number of physical predicate registers"))
        // zero unless the ISA uses condition-code registers
        .param(ParameterSpec::uint("numPhysCCRegs", 0, "Number of physical cc registers"))
        .param(ParameterSpec::uint("numIQEntries", IQ_ENTRIES, "Number of instruction queue entries"))
        .param(ParameterSpec::uint("numROBEntries", ROB_ENTRIES, "Number of reorder buffer entries"))
        // SMT
        .param(ParameterSpec::uint("smtNumFetchingThreads", 1, "SMT Number of Fetching Threads"))
        .param(ParameterSpec::enumeration("smtFetchPolicy", deps.fetch_policy, "RoundRobin", "SMT Fetch policy"))
        .param(ParameterSpec::enumeration("smtLSQPolicy", queue, "Partitioned", "SMT LSQ Sharing Policy"))
        .param(ParameterSpec::int("smtLSQThreshold", SMT_THRESHOLD, "SMT LSQ Threshold Sharing Parameter"))
        .param(ParameterSpec::enumeration("smtIQPolicy", queue, "Partitioned", "SMT IQ Sharing Policy"))
        .param(ParameterSpec::int("smtIQThreshold", SMT_THRESHOLD, "SMT IQ Threshold Sharing Parameter"))
        .param(ParameterSpec::enumeration("smtROBPolicy", queue, "Partitioned", "SMT ROB Sharing Policy"))
        .param(ParameterSpec::int("smtROBThreshold", SMT_THRESHOLD, "SMT ROB Threshold Sharing Parameter"))
        .param(ParameterSpec::enumeration("smtCommitPolicy", deps.commit_policy, "RoundRobin", "SMT Commit Policy"))
        .param(ParameterSpec::object("branchPred", branch_pred::TYPE_NAME, predictor, "Branch Predictor"))
        .param(ParameterSpec::boolean("needsTSO", false, "Enable TSO Memory model"))
        .build()
}
