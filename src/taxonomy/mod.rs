//! Error taxonomy: the groups of error-construction operations under audit.
//!
//! Groups are explicit manifests. A library either builds [`ErrorGroup`]
//! values directly or implements [`ErrorCatalog`] on its error type and hands
//! the resulting groups to a [`TaxonomyRegistry`].

pub mod extract;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use extract::extract_operations;
pub use registry::TaxonomyRegistry;

/// A named collection of error-construction operations.
///
/// The group is not validated on construction; malformed names surface as
/// [`ConfigError::MalformedGroup`](crate::ConfigError::MalformedGroup) when
/// the group is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorGroup {
    name: String,
    #[serde(default)]
    operations: Vec<String>,
}

impl ErrorGroup {
    /// Creates a group from its name and declared operation names.
    pub fn new<I, S>(name: impl Into<String>, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the fully qualified group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the operation names exactly as registered.
    #[must_use]
    pub fn operations(&self) -> &[String] {
        &self.operations
    }
}

/// An error type that publishes its own operation manifest.
///
/// ```
/// use errcov::{ErrorCatalog, ErrorGroup};
///
/// enum EdgeError {
///     RemovalNotSupported,
///     AdditionsNotSupported,
/// }
///
/// impl ErrorCatalog for EdgeError {
///     const GROUP: &'static str = "Edge.Exceptions";
///     const OPERATIONS: &'static [&'static str] =
///         &["edgeRemovalNotSupported", "edgeAdditionsNotSupported"];
/// }
///
/// let group = EdgeError::error_group();
/// assert_eq!(group.name(), "Edge.Exceptions");
/// assert_eq!(group.operations().len(), 2);
/// ```
pub trait ErrorCatalog {
    /// Fully qualified group name.
    const GROUP: &'static str;

    /// Every error-construction operation the type declares.
    const OPERATIONS: &'static [&'static str];

    /// Builds the group manifest for this type.
    fn error_group() -> ErrorGroup {
        ErrorGroup::new(Self::GROUP, Self::OPERATIONS.iter().copied())
    }
}
