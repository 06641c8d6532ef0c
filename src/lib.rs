//! errcov: build-time coverage audit for a library's error taxonomy.
//!
//! # Overview
//!
//! A library declares its error-construction operations in explicit
//! manifests, grouped by error type. Its test suite declares, per test group,
//! which of those operations it exercises. The audit computes
//! `declared − ignored − covered` and fails, listing every gap, when that
//! residue is not empty.
//!
//! # Module Structure
//!
//! - [`operation`]: canonical `group#operation` identifiers
//! - [`taxonomy`]: error groups, the registry and operation extraction
//! - [`ignore`]: the exemption list
//! - [`coverage`]: test groups, coverage declarations and the scanner
//! - [`audit`]: the verifier and its report
//! - [`manifest`]: TOML/JSON manifests for the command-line front end
//! - [`catalog`]: this crate's own taxonomy, audited by its own tests
//! - [`tracing_compat`]: optional tracing integration
//!
//! # Example
//!
//! ```
//! use errcov::{ErrorGroup, IgnoreList, TaxonomyRegistry, TestGroup, run_audit};
//!
//! let registry = TaxonomyRegistry::new([ErrorGroup::new(
//!     "Edge.Exceptions",
//!     ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"],
//! )])?;
//! let result = run_audit(&registry, &IgnoreList::new(), &[TestGroup::new("EdgeTest")])?;
//!
//! assert!(!result.passed());
//! assert_eq!(result.residue().len(), 2);
//! # Ok::<(), errcov::ConfigError>(())
//! ```

pub mod audit;
pub mod catalog;
pub mod coverage;
pub mod error;
pub mod ignore;
pub mod manifest;
pub mod operation;
pub mod taxonomy;
pub mod tracing_compat;

pub use audit::{AuditEntry, AuditResult, CoverageGap, CoverageStatus, run_audit};
pub use coverage::{CoverageDeclaration, CoverageUniverse, TestGroup, scan_coverage};
pub use error::{ConfigError, Result};
pub use ignore::IgnoreList;
pub use manifest::{AuditManifest, ManifestError, audit_file};
pub use operation::{CANONICAL_SEPARATOR, OperationId};
pub use taxonomy::{ErrorCatalog, ErrorGroup, TaxonomyRegistry, extract_operations};
