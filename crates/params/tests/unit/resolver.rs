//! # Reference Resolver Tests
//!
//! Binding of `Self.` and `Parent.` references, cycle detection, missing
//! bindings, and determinism of the finalized tree.

use std::sync::Arc;

use o3cfg_core::{ConfigError, ConfigurationNode, NodeBuilder, ParameterSpec, Reference};
use pretty_assertions::assert_eq;

use crate::common::{init_tracing, node, o3};

/// `Core { a, b, c: bool }`, every integer defaulting to 7.
fn core() -> Arc<ConfigurationNode> {
    NodeBuilder::new("Core")
        .binding("Core", "core.hh")
        .param(ParameterSpec::uint("a", 7, "A"))
        .param(ParameterSpec::uint("b", 7, "B"))
        .param(ParameterSpec::boolean("c", false, "C"))
        .build()
        .unwrap()
}

/// `Top { threads, mid: Mid { leaf: Leaf { threads } } }`.
fn three_levels() -> Arc<ConfigurationNode> {
    let leaf = NodeBuilder::new("Leaf")
        .binding("Leaf", "leaf.hh")
        .param(ParameterSpec::uint("threads", 1, "Threads"))
        .build()
        .unwrap();
    let mut leaf_default = leaf.instantiate();
    leaf_default.set("threads", Reference::parent("threads")).unwrap();

    let mid = NodeBuilder::new("Mid")
        .binding("Mid", "mid.hh")
        .param(ParameterSpec::object("leaf", "Leaf", leaf_default, "Leaf"))
        .build()
        .unwrap();
    NodeBuilder::new("Top")
        .binding("Top", "top.hh")
        .param(ParameterSpec::uint("threads", 3, "Threads"))
        .param(ParameterSpec::object("mid", "Mid", mid.instantiate(), "Mid"))
        .build()
        .unwrap()
}

fn cycle_of(err: Option<ConfigError>) -> Vec<String> {
    match err {
        Some(ConfigError::CyclicReference { cycle }) => cycle,
        other => panic!("expected a cyclic reference, got {other:?}"),
    }
}

// ──────────────────────────────────────────────────────────
// Binding
// ──────────────────────────────────────────────────────────

#[test]
fn test_self_reference_chain() {
    init_tracing();
    let mut inst = core().instantiate();
    inst.set("a", Reference::this("b")).unwrap();
    inst.set("b", 9u32).unwrap();

    let frozen = inst.finalize().unwrap();
    assert_eq!(frozen.uint("a"), Some(9));
    assert_eq!(frozen.uint("b"), Some(9));
}

#[test]
fn test_parent_reference_skips_ancestors_without_the_parameter() {
    let mut top = three_levels().instantiate();
    top.set("threads", 5u32).unwrap();

    let frozen = top.finalize().unwrap();
    let leaf = frozen.child("mid").and_then(|m| m.child("leaf")).unwrap();
    assert_eq!(leaf.path(), "Top.mid.leaf");
    assert_eq!(leaf.uint("threads"), Some(5));
}

#[test]
fn test_parent_reference_at_the_root_is_unresolved() {
    let mut inst = core().instantiate();
    inst.set("a", Reference::parent("a")).unwrap();
    let err = inst.finalize().err();
    assert!(matches!(
        err,
        Some(ConfigError::UnresolvedReference { path, param, reference })
            if path == "Core" && param == "a" && reference == "Parent.a"
    ));
}

#[test]
fn test_reference_to_missing_parameter_is_unresolved() {
    let mut inst = core().instantiate();
    inst.set("a", Reference::this("z")).unwrap();
    assert!(matches!(inst.finalize(), Err(ConfigError::UnresolvedReference { .. })));
}

#[test]
fn test_bound_value_is_checked_against_the_referencing_kind() {
    let mut inst = core().instantiate();
    inst.set("a", Reference::this("c")).unwrap();
    let err = inst.finalize().err();
    assert!(matches!(err, Some(ConfigError::TypeMismatch { param, .. }) if param == "Core.a"));
}

#[test]
fn test_negative_signed_value_cannot_bind_to_unsigned() {
    let mut cpu = o3();
    cpu.set("activity", Reference::this("cpu_id")).unwrap();
    assert!(matches!(cpu.finalize(), Err(ConfigError::TypeMismatch { .. })));
}

#[test]
fn test_reference_to_object_parameter_is_rejected() {
    let mut cpu = o3();
    cpu.set("activity", Reference::this("fuPool")).unwrap();
    assert!(matches!(cpu.finalize(), Err(ConfigError::TypeMismatch { .. })));
}

// ──────────────────────────────────────────────────────────
// Cycles
// ──────────────────────────────────────────────────────────

#[test]
fn test_self_loop_is_a_cycle() {
    let mut inst = core().instantiate();
    inst.set("a", Reference::this("a")).unwrap();
    assert_eq!(cycle_of(inst.finalize().err()), ["Core.a", "Core.a"]);
}

#[test]
fn test_two_parameter_cycle() {
    let mut inst = core().instantiate();
    inst.set("a", Reference::this("b")).unwrap();
    inst.set("b", Reference::this("a")).unwrap();
    assert_eq!(cycle_of(inst.finalize().err()), ["Core.a", "Core.b", "Core.a"]);
    assert!(!inst.is_finalized());
}

#[test]
fn test_cycle_reached_from_a_child_reports_only_the_loop() {
    let child = NodeBuilder::new("Child")
        .binding("Child", "child.hh")
        .param(ParameterSpec::uint("x", 0, "X"))
        .build()
        .unwrap();
    let mut child_default = child.instantiate();
    child_default.set("x", Reference::parent("b")).unwrap();

    let root = NodeBuilder::new("Root")
        .binding("Root", "root.hh")
        .param(ParameterSpec::object("child", "Child", child_default, "Child"))
        .param(ParameterSpec::uint("b", 0, "B"))
        .param(ParameterSpec::uint("c", 0, "C"))
        .build()
        .unwrap();

    let mut inst = root.instantiate();
    inst.set("b", Reference::this("c")).unwrap();
    inst.set("c", Reference::this("b")).unwrap();
    assert_eq!(cycle_of(inst.finalize().err()), ["Root.b", "Root.c", "Root.b"]);
}

// ──────────────────────────────────────────────────────────
// Bindings and determinism
// ──────────────────────────────────────────────────────────

#[test]
fn test_unbound_root_cannot_finalize() {
    let mut cpu = node("BaseCPU").instantiate();
    let err = cpu.finalize().err();
    assert!(matches!(
        err,
        Some(ConfigError::MissingBinding { type_name, path })
            if type_name == "BaseCPU" && path == "BaseCPU"
    ));
}

#[test]
fn test_unbound_child_cannot_finalize() {
    let mut cpu = o3();
    cpu.set("branchPred", node("BranchPredictor").instantiate()).unwrap();
    let err = cpu.finalize().err();
    assert!(matches!(
        err,
        Some(ConfigError::MissingBinding { type_name, path })
            if type_name == "BranchPredictor" && path == "BaseO3CPU.branchPred"
    ));
}

#[test]
fn test_identical_inputs_give_identical_snapshots() {
    let build = || {
        let mut cpu = o3();
        cpu.set("numThreads", 2u32).unwrap();
        cpu.set("smtFetchPolicy", "Branch").unwrap();
        cpu.set_ref("squashWidth", "Self.commitWidth").unwrap();
        cpu.finalize().unwrap()
    };
    let (first, second) = (build(), build());
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}
