//! Coverage verification: the audit entry point.
//!
//! [`run_audit`] expands every registered error group, scans every test
//! group, and reports each declared identifier that is neither covered nor
//! exempted. Configuration problems abort with
//! [`ConfigError`](crate::ConfigError); a coverage
//! gap is an ordinary, deterministic [`AuditResult`] that fails.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::coverage::{TestGroup, scan_coverage};
use crate::error::Result;
use crate::ignore::IgnoreList;
use crate::operation::OperationId;
use crate::taxonomy::{TaxonomyRegistry, extract_operations};
use crate::tracing_compat::{debug, trace, warn};

/// Audit outcome for one declared identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// At least one test group declares it.
    Covered,
    /// Not covered, but exempted by the ignore list.
    Ignored,
    /// Neither covered nor exempted.
    Uncovered,
}

impl CoverageStatus {
    /// Returns the status name in lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Covered => "covered",
            Self::Ignored => "ignored",
            Self::Uncovered => "uncovered",
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared identifier and how the audit classified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// The declared identifier.
    pub id: OperationId,
    /// Classification.
    pub status: CoverageStatus,
    /// Paths of the test groups declaring it, in order.
    pub tests: Vec<String>,
}

/// Result of one audit run.
///
/// Every list is sorted by canonical identifier, so two runs over the same
/// configuration compare equal regardless of registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditResult {
    entries: Vec<AuditEntry>,
    residue: Vec<OperationId>,
    stale_declarations: Vec<OperationId>,
    stale_ignores: Vec<OperationId>,
    claimed_count: usize,
}

impl AuditResult {
    /// Returns true if no declared, non-exempted operation is uncovered.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.residue.is_empty()
    }

    /// Uncovered, non-exempted identifiers in canonical order.
    #[must_use]
    pub fn residue(&self) -> &[OperationId] {
        &self.residue
    }

    /// Every declared identifier with its classification.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Number of distinct declared identifiers.
    #[must_use]
    pub fn declared_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of declared identifiers with [`CoverageStatus::Covered`].
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.with_status(CoverageStatus::Covered).count()
    }

    /// Number of distinct identifiers claimed by test groups, stale claims
    /// included.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.claimed_count
    }

    /// Declared identifiers skipped only because they are ignored.
    pub fn exempted(&self) -> impl Iterator<Item = &OperationId> {
        self.with_status(CoverageStatus::Ignored)
    }

    /// Claimed identifiers that match no declared operation.
    #[must_use]
    pub fn stale_declarations(&self) -> &[OperationId] {
        &self.stale_declarations
    }

    /// Ignore entries that match no declared operation or are already covered.
    #[must_use]
    pub fn stale_ignores(&self) -> &[OperationId] {
        &self.stale_ignores
    }

    fn with_status(&self, status: CoverageStatus) -> impl Iterator<Item = &OperationId> {
        self.entries
            .iter()
            .filter(move |entry| entry.status == status)
            .map(|entry| &entry.id)
    }

    /// Converts a failing audit into a [`CoverageGap`].
    pub fn ensure_passed(&self) -> core::result::Result<(), CoverageGap> {
        if self.passed() {
            Ok(())
        } else {
            Err(CoverageGap {
                uncovered: self.residue.clone(),
            })
        }
    }

    /// Panics with every uncovered identifier if the audit failed.
    ///
    /// Intended for use as the final assertion of a test.
    #[track_caller]
    pub fn assert_passed(&self) {
        if let Err(gap) = self.ensure_passed() {
            panic!("{gap}");
        }
    }

    /// Renders a human-readable report.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            &mut out,
            "coverage audit: {} (declared {}, covered {}, exempted {}, uncovered {})",
            if self.passed() { "PASS" } else { "FAIL" },
            self.declared_count(),
            self.covered_count(),
            self.exempted().count(),
            self.residue.len(),
        );
        for entry in &self.entries {
            let _ = match entry.status {
                CoverageStatus::Covered => {
                    writeln!(&mut out, "{}: {}", entry.id, entry.tests.join(", "))
                }
                CoverageStatus::Ignored => writeln!(&mut out, "{}: <ignored>", entry.id),
                CoverageStatus::Uncovered => writeln!(&mut out, "{}: <missing>", entry.id),
            };
        }
        write_list(&mut out, "stale declarations", &self.stale_declarations);
        write_list(&mut out, "stale ignores", &self.stale_ignores);
        out
    }

    /// Renders a JSON report.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let operations = self
            .entries
            .iter()
            .map(|entry| {
                json!({
                    "operation": entry.id,
                    "status": entry.status,
                    "tests": entry.tests,
                })
            })
            .collect::<Vec<_>>();

        json!({
            "summary": {
                "passed": self.passed(),
                "declared": self.declared_count(),
                "covered": self.covered_count(),
                "claimed": self.claimed_count,
                "exempted": self.exempted().count(),
                "uncovered": self.residue.len(),
            },
            "operations": operations,
            "residue": self.residue,
            "stale_declarations": self.stale_declarations,
            "stale_ignores": self.stale_ignores,
        })
    }
}

fn write_list(out: &mut String, title: &str, ids: &[OperationId]) {
    if ids.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for id in ids {
        let _ = writeln!(out, "  - {id}");
    }
}

/// A failed audit: declared operations that no test group covers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CoverageGap {
    uncovered: Vec<OperationId>,
}

impl CoverageGap {
    /// The uncovered identifiers, in canonical order.
    #[must_use]
    pub fn uncovered(&self) -> &[OperationId] {
        &self.uncovered
    }
}

impl fmt::Display for CoverageGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} declared error operation(s) have no covering test:",
            self.uncovered.len()
        )?;
        for id in &self.uncovered {
            write!(f, "\n  - {id}")?;
        }
        Ok(())
    }
}

/// Runs the coverage audit.
///
/// ```
/// use errcov::{ErrorGroup, IgnoreList, TaxonomyRegistry, TestGroup, run_audit};
///
/// let registry = TaxonomyRegistry::new([ErrorGroup::new(
///     "Edge.Exceptions",
///     ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"],
/// )])?;
/// let ignore = IgnoreList::from_entries(["Edge.Exceptions#edgeRemovalNotSupported"])?;
/// let tests = [TestGroup::new("EdgeTest").covers("Edge.Exceptions", ["edgeAdditionsNotSupported"])];
///
/// let result = run_audit(&registry, &ignore, &tests)?;
/// assert!(result.passed());
/// # Ok::<(), errcov::ConfigError>(())
/// ```
pub fn run_audit(
    registry: &TaxonomyRegistry,
    ignore: &IgnoreList,
    test_groups: &[TestGroup],
) -> Result<AuditResult> {
    let mut declared = BTreeSet::new();
    for group in registry.groups() {
        declared.extend(extract_operations(group)?);
    }
    let covered = scan_coverage(test_groups)?;

    let mut entries = Vec::with_capacity(declared.len());
    let mut residue = Vec::new();
    for id in &declared {
        let tests = covered
            .covering_groups(id)
            .map(str::to_string)
            .collect::<Vec<_>>();
        let status = if !tests.is_empty() {
            CoverageStatus::Covered
        } else if ignore.is_ignored(id) {
            CoverageStatus::Ignored
        } else {
            residue.push(id.clone());
            CoverageStatus::Uncovered
        };
        trace!(operation = %id, status = status.as_str(), "audited operation");
        entries.push(AuditEntry {
            id: id.clone(),
            status,
            tests,
        });
    }

    let stale_declarations = covered
        .ids()
        .filter(|id| !declared.contains(*id))
        .cloned()
        .collect::<Vec<_>>();
    let stale_ignores = ignore
        .iter()
        .filter(|id| !declared.contains(*id) || covered.contains(id))
        .cloned()
        .collect::<Vec<_>>();
    if !stale_declarations.is_empty() {
        warn!(
            stale = ?stale_declarations,
            "coverage declared for operations no group declares"
        );
    }

    debug!(
        groups = registry.len(),
        declared = declared.len(),
        covered = covered.len(),
        uncovered = residue.len(),
        "coverage audit complete"
    );

    Ok(AuditResult {
        entries,
        residue,
        stale_declarations,
        stale_ignores,
        claimed_count: covered.len(),
    })
}
