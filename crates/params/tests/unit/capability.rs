//! # Capability Query Tests
//!
//! Per-type answers, inheritance through the ancestry, and independence from
//! instance state.

use o3cfg_core::node::{Capability, CapabilityValue};
use o3cfg_core::{ConfigurationNode, MemoryMode, NodeBuilder};
use rstest::rstest;

use crate::common::{node, o3};

fn answers(node: &ConfigurationNode) -> (MemoryMode, bool, bool) {
    (node.memory_mode(), node.require_caches(), node.support_take_over())
}

const fn atomic(_: &ConfigurationNode) -> MemoryMode {
    MemoryMode::Atomic
}

#[rstest]
#[case("BaseO3CPU", MemoryMode::Timing, true, true)]
#[case("BaseCPU", MemoryMode::Invalid, false, false)]
#[case("FUPool", MemoryMode::Invalid, false, false)]
#[case("TournamentBP", MemoryMode::Invalid, false, false)]
fn test_catalog_capabilities(
    #[case] type_name: &str,
    #[case] mode: MemoryMode,
    #[case] caches: bool,
    #[case] takeover: bool,
) {
    assert_eq!(answers(node(type_name)), (mode, caches, takeover));
}

#[test]
fn test_capabilities_are_inherited_per_query() {
    let derived = NodeBuilder::new("AtomicO3")
        .extends(node("BaseO3CPU"))
        .binding("AtomicO3", "cpu/o3/atomic.hh")
        .memory_mode(atomic)
        .build()
        .unwrap();
    assert_eq!(answers(&derived), (MemoryMode::Atomic, true, true));

    let plain = NodeBuilder::new("PlainO3").extends(node("BaseO3CPU")).build().unwrap();
    assert_eq!(answers(&plain), (MemoryMode::Timing, true, true));
}

#[test]
fn test_capabilities_ignore_instance_state() {
    let before = answers(node("BaseO3CPU"));

    let mut instances: Vec<_> = (0..8).map(|_| o3()).collect();
    for (i, cpu) in instances.iter_mut().enumerate() {
        cpu.set("numThreads", i as u32 + 1).unwrap();
        cpu.set("needsTSO", true).unwrap();
        let _ = cpu.finalize().unwrap();
        assert_eq!(answers(cpu.node()), before);
    }
    assert_eq!(answers(node("BaseO3CPU")), before);
}

#[test]
fn test_generic_capability_query() {
    let o3 = node("BaseO3CPU");
    assert_eq!(
        o3.capability(Capability::MemoryMode),
        CapabilityValue::MemoryMode(MemoryMode::Timing)
    );
    assert_eq!(o3.capability(Capability::RequireCaches), CapabilityValue::Flag(true));
    assert_eq!(o3.capability(Capability::SupportTakeOver).to_string(), "true");
}

#[test]
fn test_capability_and_mode_names() {
    for cap in Capability::ALL {
        assert_eq!(cap.name().parse::<Capability>(), Ok(cap));
    }
    assert!("memoryMode".parse::<Capability>().is_err());
    assert_eq!(MemoryMode::Timing.to_string(), "timing");
    assert_eq!(MemoryMode::AtomicNoncaching.as_str(), "atomic_noncaching");
}
