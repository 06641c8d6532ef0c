//! Canonical operation identifiers.
//!
//! An [`OperationId`] names one error-construction operation inside one
//! error group. Its canonical rendering is `"<group>#<operation>"`, and both
//! the declared side (extracted from error groups) and the covered side
//! (expanded from test-group declarations) are built through the same
//! constructor, so set comparisons between them are exact.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Separator between the group name and the operation name.
pub const CANONICAL_SEPARATOR: char = '#';

/// A `(group, operation)` pair with a canonical `group#operation` form.
///
/// Neither part is empty and neither contains [`CANONICAL_SEPARATOR`], so the
/// canonical string and the pair determine each other. Equality, hashing and
/// ordering all go through the canonical string; ordering is therefore
/// lexicographic by `group#operation`.
///
/// ```
/// use errcov::OperationId;
///
/// let id = OperationId::new("Edge.Exceptions", "edgeRemovalNotSupported").unwrap();
/// assert_eq!(id.to_string(), "Edge.Exceptions#edgeRemovalNotSupported");
/// assert_eq!(id.group(), "Edge.Exceptions");
///
/// let parsed: OperationId = "Edge.Exceptions#edgeRemovalNotSupported".parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId {
    canonical: String,
    split: usize,
}

impl OperationId {
    /// Builds an identifier from its two parts.
    pub fn new(group: &str, operation: &str) -> Result<Self, ConfigError> {
        if !is_valid_part(group) || !is_valid_part(operation) {
            return Err(ConfigError::MalformedOperationId {
                input: format!("{group}{CANONICAL_SEPARATOR}{operation}"),
            });
        }
        Ok(Self::from_valid_parts(group, operation))
    }

    pub(crate) fn from_valid_parts(group: &str, operation: &str) -> Self {
        let mut canonical = String::with_capacity(group.len() + operation.len() + 1);
        canonical.push_str(group);
        canonical.push(CANONICAL_SEPARATOR);
        canonical.push_str(operation);
        Self {
            canonical,
            split: group.len(),
        }
    }

    /// Returns the group name.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.canonical[..self.split]
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.canonical[self.split + CANONICAL_SEPARATOR.len_utf8()..]
    }

    /// Returns the canonical `group#operation` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

/// Returns true if `part` can appear on either side of the separator.
pub(crate) fn is_valid_part(part: &str) -> bool {
    !part.trim().is_empty() && !part.contains(CANONICAL_SEPARATOR)
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationId({})", self.canonical)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for OperationId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedOperationId {
            input: s.to_string(),
        };
        let (group, operation) = s.split_once(CANONICAL_SEPARATOR).ok_or_else(malformed)?;
        Self::new(group, operation).map_err(|_| malformed())
    }
}

impl Serialize for OperationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for OperationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
