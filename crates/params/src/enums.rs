//! Scoped enumerations.
//!
//! Each [`EnumType`] is a closed, ordered, non-empty set of symbolic variants
//! and forms its own namespace: the same variant text in two enumerations
//! never aliases. The [`EnumRegistry`] owns every enumeration a catalog
//! declares and resolves `(enumeration, variant)` pairs to ordinals.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::common::{ConfigError, Result};

/// A named, closed, ordered set of distinct variant names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    /// Creates an enumeration after checking that it is non-empty and has no
    /// repeated or blank variants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidEnum`] when the variant list is empty, contains a
    /// blank name, or repeats a name.
    pub fn new<S: AsRef<str>>(name: impl Into<String>, variants: &[S]) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| ConfigError::InvalidEnum {
            name: name.clone(),
            reason,
        };

        if variants.is_empty() {
            return Err(invalid("no variants".to_string()));
        }

        let mut seen: Vec<String> = Vec::with_capacity(variants.len());
        for variant in variants {
            let variant = variant.as_ref();
            if variant.trim().is_empty() {
                return Err(invalid("blank variant name".to_string()));
            }
            if seen.iter().any(|v| v == variant) {
                return Err(invalid(format!("variant '{variant}' declared twice")));
            }
            seen.push(variant.to_string());
        }

        Ok(Self {
            name,
            variants: seen,
        })
    }

    /// Enumeration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variants in declaration order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Whether `variant` belongs to this enumeration.
    pub fn contains(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }

    /// Returns the ordinal of `variant` within this enumeration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownVariant`] if the name is not declared here, even
    /// when another enumeration has a variant with the same text.
    pub fn resolve(&self, variant: &str) -> Result<usize> {
        self.variants
            .iter()
            .position(|v| v == variant)
            .ok_or_else(|| ConfigError::UnknownVariant {
                enum_name: self.name.clone(),
                variant: variant.to_string(),
            })
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.name, self.variants.join(", "))
    }
}

/// Registry of enumerations keyed by name.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: BTreeMap<String, Arc<EnumType>>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new enumeration and returns a shared handle to it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidEnum`] when the name is already registered or the
    /// variant list is malformed.
    pub fn define_enum<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        variants: &[S],
    ) -> Result<Arc<EnumType>> {
        let ty = EnumType::new(name, variants)?;
        if self.enums.contains_key(ty.name()) {
            return Err(ConfigError::InvalidEnum {
                name: ty.name().to_string(),
                reason: "already defined".to_string(),
            });
        }

        debug!(name = ty.name(), variants = ty.variants().len(), "defined enumeration");
        let ty = Arc::new(ty);
        let _ = self.enums.insert(ty.name().to_string(), Arc::clone(&ty));
        Ok(ty)
    }

    /// Looks up an enumeration by name.
    pub fn get(&self, name: &str) -> Option<&Arc<EnumType>> {
        self.enums.get(name)
    }

    /// Resolves `variant` within the enumeration `enum_name`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownEnum`] if `enum_name` is not registered, otherwise
    /// [`ConfigError::UnknownVariant`] if the variant is not part of it.
    pub fn resolve(&self, enum_name: &str, variant: &str) -> Result<usize> {
        self.get(enum_name)
            .ok_or_else(|| ConfigError::UnknownEnum {
                name: enum_name.to_string(),
            })?
            .resolve(variant)
    }

    /// Iterates over registered enumerations in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EnumType>> {
        self.enums.values()
    }

    /// Number of registered enumerations.
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// Whether the registry holds no enumerations.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
