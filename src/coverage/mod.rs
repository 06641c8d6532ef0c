//! Coverage declarations carried by test groups.
//!
//! A [`TestGroup`] is a caller-supplied node in a containment hierarchy. Each
//! node may declare, with [`TestGroup::covers`], that it exercises a set of
//! operations from one error group. [`scan_coverage`] folds the whole
//! hierarchy into a [`CoverageUniverse`].

pub mod scan;

use serde::{Deserialize, Serialize};

pub use scan::{CoverageUniverse, scan_coverage};

/// Claim that a test group exercises the named operations of one error group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageDeclaration {
    /// Name of the targeted error group.
    #[serde(rename = "group")]
    pub target: String,
    /// Operation names asserted to be tested. Order is irrelevant.
    #[serde(default)]
    pub operations: Vec<String>,
}

impl CoverageDeclaration {
    /// Creates a declaration.
    pub fn new<I, S>(target: impl Into<String>, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into(),
            operations: operations.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named group of tests with optional coverage declarations and children.
///
/// ```
/// use errcov::TestGroup;
///
/// let suite = TestGroup::new("VariablesTest").child(
///     TestGroup::new("VariableExceptionConsistency")
///         .covers("Graph.Variables.Exceptions", ["variableKeyCanNotBeEmpty"]),
/// );
/// assert!(suite.declarations().is_empty());
/// assert_eq!(suite.children()[0].declarations().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestGroup {
    name: String,
    #[serde(default, rename = "covers")]
    declarations: Vec<CoverageDeclaration>,
    #[serde(default)]
    children: Vec<Self>,
}

impl TestGroup {
    /// Creates a test group with no declarations and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Declares coverage of `operations` in the `target` error group.
    #[must_use]
    pub fn covers<I, S>(self, target: impl Into<String>, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(CoverageDeclaration::new(target, operations))
    }

    /// Attaches a prebuilt declaration.
    #[must_use]
    pub fn declare(mut self, declaration: CoverageDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Nests a child test group.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declarations attached directly to this group.
    #[must_use]
    pub fn declarations(&self) -> &[CoverageDeclaration] {
        &self.declarations
    }

    /// Returns the nested groups.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}
