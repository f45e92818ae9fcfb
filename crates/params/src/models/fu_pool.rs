//! Functional-unit pool schemas.
//!
//! The pool's unit list is owned by the native side; the schema only names
//! which pool implementation a core is wired to.

use std::sync::Arc;

use crate::common::Result;
use crate::node::{ConfigurationNode, NodeBuilder};

/// Base pool type name, also the kind of `BaseO3CPU.fuPool`.
pub const TYPE_NAME: &str = "FUPool";

/// Default pool type name.
pub const DEFAULT_TYPE_NAME: &str = "DefaultFUPool";

/// Declares `FUPool`.
///
/// # Errors
///
/// Any [`ConfigurationNode::declare`] error.
pub fn declare() -> Result<Arc<ConfigurationNode>> {
    NodeBuilder::new(TYPE_NAME)
        .binding("FUPool", "cpu/o3/fu_pool.hh")
        .build()
}

/// Declares `DefaultFUPool` on top of `fu_pool`.
///
/// # Errors
///
/// Any [`ConfigurationNode::declare`] error.
pub fn declare_default(fu_pool: &Arc<ConfigurationNode>) -> Result<Arc<ConfigurationNode>> {
    NodeBuilder::new(DEFAULT_TYPE_NAME)
        .extends(fu_pool)
        .binding("DefaultFUPool", "cpu/o3/fu_pool.hh")
        .build()
}
