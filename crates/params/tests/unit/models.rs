//! # Out-of-Order CPU Model Tests
//!
//! Catalog contents and end-to-end scenarios on `BaseO3CPU`: defaults,
//! single-parameter overrides, enum validation, and the thread-count
//! reference into the branch predictor.

use o3cfg_core::handoff::FrozenParam;
use o3cfg_core::{Catalog, ConfigError, FrozenValue};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{catalog, default_o3_frozen, o3};

/// Names of every entry whose value differs between two handoff tables.
fn changed<'a>(a: &'a [FrozenParam], b: &[FrozenParam]) -> Vec<&'a str> {
    a.iter()
        .zip(b)
        .filter(|(x, y)| x != y)
        .map(|(x, _)| x.name())
        .collect()
}

// ──────────────────────────────────────────────────────────
// Catalog
// ──────────────────────────────────────────────────────────

#[test]
fn test_catalog_contents() {
    let names: Vec<&str> = catalog().nodes().map(|n| n.type_name()).collect();
    assert_eq!(
        names,
        ["BaseCPU", "BaseO3CPU", "BranchPredictor", "DefaultFUPool", "FUPool", "TournamentBP"]
    );
    assert_eq!(catalog().enums().len(), 3);
    assert!(matches!(
        catalog().require("MinorCPU"),
        Err(ConfigError::UnknownNodeType { name }) if name == "MinorCPU"
    ));
}

#[test]
fn test_catalog_builds_repeatably() {
    let fresh = Catalog::build().unwrap();
    let a: Vec<&str> = fresh.nodes().map(|n| n.type_name()).collect();
    let b: Vec<&str> = catalog().nodes().map(|n| n.type_name()).collect();
    assert_eq!(a, b);
}

#[rstest]
#[case("BaseO3CPU", Some(("o3::CPU", "cpu/o3/dyn_inst.hh")))]
#[case("TournamentBP", Some(("branch_prediction::TournamentBP", "cpu/pred/tournament.hh")))]
#[case("FUPool", Some(("FUPool", "cpu/o3/fu_pool.hh")))]
#[case("DefaultFUPool", Some(("DefaultFUPool", "cpu/o3/fu_pool.hh")))]
#[case("BaseCPU", None)]
#[case("BranchPredictor", None)]
fn test_bindings(#[case] type_name: &str, #[case] expected: Option<(&str, &str)>) {
    let binding = catalog().require(type_name).unwrap().binding();
    assert_eq!(binding.map(|b| (b.name(), b.header())), expected);
}

// ──────────────────────────────────────────────────────────
// Scenarios
// ──────────────────────────────────────────────────────────

#[rstest]
#[case("fetchWidth", 12)]
#[case("decodeWidth", 12)]
#[case("LQEntries", 48)]
#[case("SQEntries", 48)]
#[case("numPhysIntRegs", 256)]
#[case("numPhysVecPredRegs", 32)]
#[case("numIQEntries", 384)]
#[case("numROBEntries", 1024)]
#[case("store_set_clear_period", 62464)]
#[case("numThreads", 1)]
fn test_default_unsigned_values(#[case] name: &str, #[case] expected: u64) {
    assert_eq!(default_o3_frozen().uint(name), Some(expected));
}

#[test]
fn test_default_mixed_kinds() {
    let frozen = default_o3_frozen();
    assert_eq!(frozen.cycles("renameToIEWDelay"), Some(2));
    assert_eq!(frozen.cycles("trapLatency"), Some(13));
    assert_eq!(frozen.cycles("syscallRetryLatency"), Some(10000));
    assert_eq!(frozen.int("cpu_id"), Some(-1));
    assert_eq!(frozen.int("smtROBThreshold"), Some(100));
    assert_eq!(frozen.flag("LSQCheckLoads"), Some(true));
    assert_eq!(frozen.flag("needsTSO"), Some(false));
    assert_eq!(frozen.variant("smtFetchPolicy"), Some("RoundRobin"));
    assert_eq!(frozen.variant("smtIQPolicy"), Some("Partitioned"));
    assert_eq!(frozen.variant("smtCommitPolicy"), Some("RoundRobin"));
}

#[test]
fn test_fetch_width_override_changes_nothing_else() {
    let defaults = default_o3_frozen();
    let mut cpu = o3();
    cpu.set("fetchWidth", 8u32).unwrap();
    let frozen = cpu.finalize().unwrap();

    assert_eq!(frozen.uint("fetchWidth"), Some(8));
    assert_eq!(changed(frozen.params(), defaults.params()), ["fetchWidth"]);
    assert_eq!(frozen.children(), defaults.children());
}

#[test]
fn test_unknown_fetch_policy_is_a_type_mismatch() {
    let mut cpu = o3();
    let err = cpu.set("smtFetchPolicy", "Partitioned").err();
    assert!(matches!(err, Some(ConfigError::TypeMismatch { param, .. }) if param == "smtFetchPolicy"));
    assert_eq!(cpu.finalize().unwrap().variant("smtFetchPolicy"), Some("RoundRobin"));
}

#[test]
fn test_enum_override_carries_ordinal() {
    let mut cpu = o3();
    cpu.set("smtFetchPolicy", "IQCount").unwrap();
    cpu.set("smtLSQPolicy", "Threshold").unwrap();
    let frozen = cpu.finalize().unwrap();
    assert_eq!(
        frozen.get("smtFetchPolicy"),
        Some(&FrozenValue::Enum {
            enumeration: "SMTFetchPolicy".to_string(),
            variant: "IQCount".to_string(),
            ordinal: 2,
        })
    );
    assert_eq!(frozen.variant("smtLSQPolicy"), Some("Threshold"));
}

#[test]
fn test_branch_predictor_follows_core_thread_count() {
    let mut cpu = o3();
    cpu.set("numThreads", 4u32).unwrap();
    let frozen = cpu.finalize().unwrap();

    let predictor = frozen.child("branchPred").unwrap();
    assert_eq!(predictor.type_name(), "TournamentBP");
    assert_eq!(predictor.uint("numThreads"), Some(4));
    assert_eq!(predictor.uint("localPredictorSize"), Some(2048));
    assert_eq!(predictor.uint("choicePredictorSize"), Some(8192));
}

#[test]
fn test_literal_override_replaces_thread_count_reference() {
    let mut cpu = o3();
    cpu.set("numThreads", 4u32).unwrap();
    cpu.set_path("branchPred.numThreads", 2u32).unwrap();
    let frozen = cpu.finalize().unwrap();
    assert_eq!(frozen.child("branchPred").unwrap().uint("numThreads"), Some(2));
}

#[test]
fn test_object_parameters_record_child_identity() {
    let frozen = default_o3_frozen();
    assert_eq!(
        frozen.get("fuPool"),
        Some(&FrozenValue::Object {
            binding: "DefaultFUPool".to_string(),
            path: "BaseO3CPU.fuPool".to_string(),
        })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_single_override_does_not_leak(
        name in prop::sample::select(vec![
            "activity", "fetchWidth", "fetchBufferSize", "LQEntries", "SQEntries",
            "LFSTSize", "numPhysFloatRegs", "numIQEntries", "numROBEntries", "smtNumFetchingThreads",
        ]),
        value in 0u32..=u32::MAX,
    ) {
        let defaults = default_o3_frozen();
        let mut cpu = o3();
        cpu.set(name, value).unwrap();
        let frozen = cpu.finalize().unwrap();

        prop_assert_eq!(frozen.uint(name), Some(u64::from(value)));
        let diff = changed(frozen.params(), defaults.params());
        prop_assert!(diff.iter().all(|n| *n == name), "leaked into {:?}", diff);
        prop_assert_eq!(frozen.children(), defaults.children());
    }
}
