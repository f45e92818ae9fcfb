//! Branch predictor schemas.
//!
//! `BranchPredictor` holds the parameters every predictor shares and has no
//! binding; only concrete predictors such as `TournamentBP` can be finalized.

use std::sync::Arc;

use crate::common::Result;
use crate::config::defaults;
use crate::node::{ConfigurationNode, NodeBuilder};
use crate::params::ParameterSpec;

/// Base predictor type name, also the kind of `BaseO3CPU.branchPred`.
pub const TYPE_NAME: &str = "BranchPredictor";

/// Tournament predictor type name.
pub const TOURNAMENT_TYPE_NAME: &str = "TournamentBP";

/// Declares `BranchPredictor`.
///
/// # Errors
///
/// Any [`ConfigurationNode::declare`] error.
pub fn declare() -> Result<Arc<ConfigurationNode>> {
    NodeBuilder::new(TYPE_NAME)
        .param(ParameterSpec::uint("numThreads", 1, "Number of threads"))
        .param(ParameterSpec::uint("BTBEntries", defaults::BTB_ENTRIES, "Number of BTB entries"))
        .param(ParameterSpec::uint("BTBTagSize", defaults::BTB_TAG_SIZE, "Size of the BTB tags, in bits"))
        .param(ParameterSpec::uint("RASSize", defaults::RAS_SIZE, "RAS size"))
        .param(ParameterSpec::uint("instShiftAmt", defaults::INST_SHIFT_AMT, "Number of bits to shift instructions by"))
        .build()
}

/// Declares `TournamentBP` on top of `base`.
///
/// # Errors
///
/// Any [`ConfigurationNode::declare`] error.
pub fn declare_tournament(base: &Arc<ConfigurationNode>) -> Result<Arc<ConfigurationNode>> {
    use defaults::{TOURNAMENT_CTR_BITS, TOURNAMENT_GLOBAL_SIZE, TOURNAMENT_LOCAL_SIZE};

    NodeBuilder::new(TOURNAMENT_TYPE_NAME)
        .extends(base)
        .binding("branch_prediction::TournamentBP", "cpu/pred/tournament.hh")
        .param(ParameterSpec::uint("localPredictorSize", TOURNAMENT_LOCAL_SIZE, "Size of local predictor"))
        .param(ParameterSpec::uint("localCtrBits", TOURNAMENT_CTR_BITS, "Bits per counter"))
        .param(ParameterSpec::uint("localHistoryTableSize", TOURNAMENT_LOCAL_SIZE, "Size of local history table"))
        .param(ParameterSpec::uint("globalPredictorSize", TOURNAMENT_GLOBAL_SIZE, "Size of global predictor"))
        .param(ParameterSpec::uint("globalCtrBits", TOURNAMENT_CTR_BITS, "Bits per counter"))
        .param(ParameterSpec::uint("choicePredictorSize", TOURNAMENT_GLOBAL_SIZE, "Size of choice predictor"))
        .param(ParameterSpec::uint("choiceCtrBits", TOURNAMENT_CTR_BITS, "Bits of choice counters"))
        .build()
}
