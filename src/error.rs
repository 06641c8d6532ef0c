//! Error types for audit configuration.
//!
//! A [`ConfigError`] means the audit itself is set up wrong (duplicate
//! groups, malformed registrations). It aborts the run. A coverage gap is not
//! an error of this kind: it is reported through
//! [`AuditResult`](crate::audit::AuditResult) and
//! [`CoverageGap`](crate::audit::CoverageGap).

use thiserror::Error;

/// Fatal audit configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two error groups were registered under the same name.
    #[error("error group `{name}` is registered more than once")]
    DuplicateGroup {
        /// The repeated group name.
        name: String,
    },

    /// An error group cannot be expanded into operation identifiers.
    #[error("error group `{group}` cannot be expanded: {reason}")]
    MalformedGroup {
        /// Name of the offending group, as registered.
        group: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A coverage declaration on a test group is malformed.
    #[error("test group `{test_group}` has a malformed coverage declaration for `{target}`: {reason}")]
    MalformedDeclaration {
        /// Path of the test group carrying the declaration.
        test_group: String,
        /// Declared target group.
        target: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A string is not a canonical `group#operation` identifier.
    #[error("`{input}` is not a canonical `group#operation` identifier")]
    MalformedOperationId {
        /// The rejected input.
        input: String,
    },
}

impl ConfigError {
    pub(crate) fn malformed_group(group: &str, reason: impl Into<String>) -> Self {
        Self::MalformedGroup {
            group: group.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_declaration(
        test_group: &str,
        target: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedDeclaration {
            test_group: test_group.to_string(),
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for audit configuration.
pub type Result<T> = core::result::Result<T, ConfigError>;
