//! Shared fixtures for the parameter system tests.

use std::sync::Arc;

use o3cfg_core::{Catalog, ConfigurationInstance, ConfigurationNode, FrozenConfiguration};

/// Installs a `tracing` subscriber that prints through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("o3cfg_core=trace")
        .try_init();
}

/// The process-wide model catalog.
pub fn catalog() -> &'static Catalog {
    Catalog::global().unwrap()
}

/// Schema of a built-in model.
pub fn node(type_name: &str) -> &'static Arc<ConfigurationNode> {
    catalog().require(type_name).unwrap()
}

/// A fresh, default `BaseO3CPU` instance.
pub fn o3() -> ConfigurationInstance {
    init_tracing();
    node("BaseO3CPU").instantiate()
}

/// The frozen snapshot of a default `BaseO3CPU`.
pub fn default_o3_frozen() -> Arc<FrozenConfiguration> {
    o3().finalize().unwrap()
}
