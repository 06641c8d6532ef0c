//! Registry of error groups to audit.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use super::{ErrorCatalog, ErrorGroup};

/// The set of error groups one audit run covers.
///
/// Groups are keyed by name; iteration is in name order regardless of
/// registration order. The only validation performed here is name
/// uniqueness.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyRegistry {
    groups: BTreeMap<String, ErrorGroup>,
}

impl TaxonomyRegistry {
    /// Builds a registry, rejecting duplicate group names.
    pub fn new<I>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = ErrorGroup>,
    {
        let mut registry = Self::default();
        for group in groups {
            registry.register(group)?;
        }
        Ok(registry)
    }

    /// Adds one group.
    pub fn register(&mut self, group: ErrorGroup) -> Result<()> {
        if self.groups.contains_key(group.name()) {
            return Err(ConfigError::DuplicateGroup {
                name: group.name().to_string(),
            });
        }
        self.groups.insert(group.name().to_string(), group);
        Ok(())
    }

    /// Adds the group published by an [`ErrorCatalog`] implementor.
    pub fn with_catalog<C: ErrorCatalog>(mut self) -> Result<Self> {
        self.register(C::error_group())?;
        Ok(self)
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&ErrorGroup> {
        self.groups.get(name)
    }

    /// Iterates groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = &ErrorGroup> {
        self.groups.values()
    }

    /// Number of registered groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
