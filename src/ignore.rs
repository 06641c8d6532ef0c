//! Exemptions from the coverage audit.
//!
//! An entry is either a base operation that only exists to be composed into
//! other operations, or an operation whose dedicated test is still missing.
//! Both kinds behave identically; record the reason next to the entry in the
//! table that feeds [`IgnoreList::from_entries`].

use std::collections::BTreeSet;

use crate::error::Result;
use crate::operation::OperationId;

/// Set of exempted operation identifiers. Membership is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: BTreeSet<OperationId>,
}

impl IgnoreList {
    /// Creates an empty ignore list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses canonical `group#operation` entries.
    ///
    /// ```
    /// use errcov::{IgnoreList, OperationId};
    ///
    /// let ignore = IgnoreList::from_entries(["Edge.Exceptions#edgeRemovalNotSupported"]).unwrap();
    /// let id = OperationId::new("Edge.Exceptions", "edgeRemovalNotSupported").unwrap();
    /// assert!(ignore.is_ignored(&id));
    /// assert!(IgnoreList::from_entries(["Edge.Exceptions"]).is_err());
    /// ```
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| entry.as_ref().parse::<OperationId>())
            .collect::<Result<BTreeSet<OperationId>>>()?;
        Ok(Self { entries })
    }

    /// Adds an entry. Returns false if it was already present.
    pub fn insert(&mut self, id: OperationId) -> bool {
        self.entries.insert(id)
    }

    /// Returns true if `id` is exempted.
    #[must_use]
    pub fn is_ignored(&self, id: &OperationId) -> bool {
        self.entries.contains(id)
    }

    /// Iterates entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &OperationId> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is exempted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<OperationId> for IgnoreList {
    fn from_iter<T: IntoIterator<Item = OperationId>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
