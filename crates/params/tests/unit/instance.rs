//! # Configuration Instance Tests
//!
//! Overrides, dotted paths, isolation between instances, and the one-shot
//! finalize lifecycle.

use std::sync::Arc;

use o3cfg_core::{ConfigError, Reference, Value};

use crate::common::{node, o3};

#[test]
fn test_set_unknown_parameter() {
    let mut cpu = o3();
    let err = cpu.set("fetchWidht", 8u32).err();
    assert!(matches!(
        err,
        Some(ConfigError::UnknownParameter { node, name }) if node == "BaseO3CPU" && name == "fetchWidht"
    ));
}

#[test]
fn test_rejected_set_leaves_value_unchanged() {
    let mut cpu = o3();
    assert!(matches!(cpu.set("fetchWidth", true), Err(ConfigError::TypeMismatch { .. })));
    assert!(matches!(
        cpu.set("fetchWidth", u64::from(u32::MAX) + 1),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert_eq!(cpu.get("fetchWidth"), Some(&Value::UInt(12)));
}

#[test]
fn test_set_only_affects_its_own_instance() {
    let mut first = o3();
    let second = o3();
    first.set("fetchWidth", 8u32).unwrap();
    first.set_path("branchPred.BTBEntries", 1024u32).unwrap();

    assert_eq!(first.get("fetchWidth"), Some(&Value::UInt(8)));
    assert_eq!(second.get("fetchWidth"), Some(&Value::UInt(12)));
    assert_eq!(
        second.child("branchPred").and_then(|bp| bp.get("BTBEntries")),
        Some(&Value::UInt(4096))
    );
    assert_eq!(
        node("BaseO3CPU").param("fetchWidth").unwrap().default_value(),
        &Value::UInt(12)
    );
}

#[test]
fn test_set_path_walks_object_parameters() {
    let mut cpu = o3();
    cpu.set_path("branchPred.RASSize", 32u32).unwrap();
    assert_eq!(
        cpu.child("branchPred").and_then(|bp| bp.get("RASSize")),
        Some(&Value::UInt(32))
    );

    // fetchWidth holds no child instance.
    assert!(matches!(
        cpu.set_path("fetchWidth.x", 1u32),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert!(matches!(
        cpu.set_path("branchPred.missing", 1u32),
        Err(ConfigError::UnknownParameter { .. })
    ));
}

#[test]
fn test_object_parameters_take_instances_not_references() {
    let mut cpu = o3();
    assert!(matches!(
        cpu.set("fuPool", Reference::parent("fuPool")),
        Err(ConfigError::TypeMismatch { .. })
    ));
    assert!(matches!(
        cpu.set("fuPool", node("TournamentBP").instantiate()),
        Err(ConfigError::TypeMismatch { .. })
    ));
    cpu.set("fuPool", node("FUPool").instantiate()).unwrap();
    assert_eq!(cpu.child("fuPool").map(|p| p.type_name()), Some("FUPool"));
}

#[test]
fn test_adopted_child_is_mutable_until_the_parent_finalizes() {
    let mut predictor = node("TournamentBP").instantiate();
    predictor.set("numThreads", 2u32).unwrap();
    let _ = predictor.finalize().unwrap();
    assert!(predictor.is_finalized());

    let mut cpu = o3();
    cpu.set("branchPred", predictor).unwrap();
    assert!(!cpu.child("branchPred").unwrap().is_finalized());

    cpu.set_path("branchPred.BTBEntries", 1024u32).unwrap();
    let frozen = cpu.finalize().unwrap();
    let bp = frozen.child("branchPred").unwrap();
    assert_eq!(bp.uint("BTBEntries"), Some(1024));
    assert_eq!(bp.uint("numThreads"), Some(2));

    assert!(matches!(
        cpu.set_path("branchPred.BTBEntries", 2048u32),
        Err(ConfigError::AlreadyFinalized { .. })
    ));
}

#[test]
fn test_set_ref_parses_reference_text() {
    let mut cpu = o3();
    cpu.set_ref("squashWidth", "Self.commitWidth").unwrap();
    assert_eq!(cpu.get("squashWidth"), Some(&Value::Ref(Reference::this("commitWidth"))));
    assert!(matches!(
        cpu.set_ref("squashWidth", "Owner.commitWidth"),
        Err(ConfigError::InvalidReference { .. })
    ));
}

#[test]
fn test_finalize_twice_returns_the_same_snapshot() {
    let mut cpu = o3();
    cpu.set("fetchWidth", 8u32).unwrap();
    let first = cpu.finalize().unwrap();
    let second = cpu.finalize().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(cpu.is_finalized());
}

#[test]
fn test_finalized_instance_rejects_mutation() {
    let mut cpu = o3();
    let _ = cpu.finalize().unwrap();
    assert!(matches!(cpu.set("fetchWidth", 8u32), Err(ConfigError::AlreadyFinalized { .. })));
    assert!(matches!(
        cpu.set_path("branchPred.RASSize", 8u32),
        Err(ConfigError::AlreadyFinalized { .. })
    ));
}

#[test]
fn test_failed_finalize_leaves_instance_mutable() {
    let mut cpu = o3();
    cpu.set("fetchWidth", Reference::this("fetchWidthh")).unwrap();
    assert!(matches!(cpu.finalize(), Err(ConfigError::UnresolvedReference { .. })));
    assert!(!cpu.is_finalized());

    cpu.set("fetchWidth", 6u32).unwrap();
    assert_eq!(cpu.finalize().unwrap().uint("fetchWidth"), Some(6));
}

#[test]
fn test_cloned_instance_is_independent() {
    let mut original = o3();
    let copy = original.clone();
    original.set("numROBEntries", 512u32).unwrap();
    assert_eq!(copy.get("numROBEntries"), Some(&Value::UInt(1024)));
    assert_ne!(original, copy);
}
