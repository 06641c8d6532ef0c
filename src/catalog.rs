//! This crate's own error taxonomy, audited by its own test suite.
//!
//! Every variant of [`ConfigError`] and [`ManifestError`] is an operation.
//! The integration tests declare which of them they exercise, and
//! `tests/self_audit.rs` fails if a variant is added without a test or an
//! entry in [`BUILTIN_IGNORES`].

use crate::error::{ConfigError, Result};
use crate::ignore::IgnoreList;
use crate::manifest::ManifestError;
use crate::taxonomy::{ErrorCatalog, TaxonomyRegistry};

impl ErrorCatalog for ConfigError {
    const GROUP: &'static str = "errcov::ConfigError";
    const OPERATIONS: &'static [&'static str] = &[
        "DuplicateGroup",
        "MalformedGroup",
        "MalformedDeclaration",
        "MalformedOperationId",
    ];
}

impl ErrorCatalog for ManifestError {
    const GROUP: &'static str = "errcov::ManifestError";
    const OPERATIONS: &'static [&'static str] =
        &["Io", "Toml", "Json", "UnsupportedFormat", "Config"];
}

/// Operations exempted from the self-audit.
pub const BUILTIN_IGNORES: &[&str] = &[
    // Wraps a ConfigError; the wrapped variants are audited in their own group.
    "errcov::ManifestError#Config",
];

/// Registry holding every error group this crate defines.
pub fn builtin_registry() -> Result<TaxonomyRegistry> {
    TaxonomyRegistry::default()
        .with_catalog::<ConfigError>()?
        .with_catalog::<ManifestError>()
}

/// Ignore list for the self-audit.
pub fn builtin_ignores() -> Result<IgnoreList> {
    IgnoreList::from_entries(BUILTIN_IGNORES)
}
