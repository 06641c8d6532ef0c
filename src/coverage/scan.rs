//! Coverage scanning: test-group hierarchy to covered identifiers.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ConfigError, Result};
use crate::operation::{OperationId, is_valid_part};
use crate::tracing_compat::{debug, trace};

use super::{CoverageDeclaration, TestGroup};

/// Separator used to render nested test-group paths.
pub const PATH_SEPARATOR: &str = "::";

/// Every identifier claimed as covered, with the test groups claiming it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageUniverse {
    covered: BTreeMap<OperationId, BTreeSet<String>>,
}

impl CoverageUniverse {
    /// Returns true if any test group declares `id`.
    #[must_use]
    pub fn contains(&self, id: &OperationId) -> bool {
        self.covered.contains_key(id)
    }

    /// Returns the paths of the test groups declaring `id`, in order.
    pub fn covering_groups(&self, id: &OperationId) -> impl Iterator<Item = &str> {
        self.covered
            .get(id)
            .into_iter()
            .flat_map(|paths| paths.iter().map(String::as_str))
    }

    /// Iterates covered identifiers in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = &OperationId> {
        self.covered.keys()
    }

    /// Number of distinct covered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    /// Returns true if nothing is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    /// Unions another universe into this one.
    ///
    /// Union is commutative and associative, so partial universes built from
    /// disjoint slices of the test groups can be merged in any order.
    pub fn merge(&mut self, other: Self) {
        for (id, paths) in other.covered {
            self.covered.entry(id).or_default().extend(paths);
        }
    }

    fn record(&mut self, id: OperationId, path: &str) {
        self.covered.entry(id).or_default().insert(path.to_string());
    }
}

/// Builds the coverage universe for a list of test groups.
///
/// Children are visited transitively; only the hierarchy the caller supplies
/// is considered. Groups without declarations contribute nothing.
pub fn scan_coverage(test_groups: &[TestGroup]) -> Result<CoverageUniverse> {
    let mut universe = CoverageUniverse::default();
    for root in test_groups {
        universe.merge(scan_tree(root)?);
    }
    debug!(
        roots = test_groups.len(),
        covered = universe.len(),
        "scanned coverage declarations"
    );
    Ok(universe)
}

fn scan_tree(root: &TestGroup) -> Result<CoverageUniverse> {
    let mut universe = CoverageUniverse::default();
    let mut pending = vec![(root.name().to_string(), root)];

    while let Some((path, group)) = pending.pop() {
        for declaration in group.declarations() {
            expand_declaration(&path, declaration, &mut universe)?;
        }
        for child in group.children() {
            pending.push((format!("{path}{PATH_SEPARATOR}{}", child.name()), child));
        }
    }

    Ok(universe)
}

fn expand_declaration(
    path: &str,
    declaration: &CoverageDeclaration,
    universe: &mut CoverageUniverse,
) -> Result<()> {
    let target = declaration.target.as_str();
    if !is_valid_part(target) {
        return Err(ConfigError::malformed_declaration(
            path,
            target,
            "target group name must be non-empty and must not contain `#`",
        ));
    }

    for operation in &declaration.operations {
        if !is_valid_part(operation) {
            return Err(ConfigError::malformed_declaration(
                path,
                target,
                format!("operation name `{operation}` must be non-empty and must not contain `#`"),
            ));
        }
        let id = OperationId::from_valid_parts(target, operation);
        trace!(test_group = path, operation = %id, "coverage declared");
        universe.record(id, path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> OperationId {
        raw.parse().unwrap()
    }

    #[test]
    fn group_without_declarations_contributes_nothing() {
        let universe = scan_coverage(&[TestGroup::new("Empty")]).unwrap();
        assert!(universe.is_empty());
        assert!(scan_coverage(&[]).unwrap().is_empty());
    }

    #[test]
    fn nested_declarations_are_found() {
        let suite = TestGroup::new("PropertyTest").child(
            TestGroup::new("PropertyValidationOnAddExceptionConsistency").child(
                TestGroup::new("Deep").covers("Property.Exceptions", ["propertyValueCanNotBeNull"]),
            ),
        );
        let universe = scan_coverage(&[suite]).unwrap();
        let target = id("Property.Exceptions#propertyValueCanNotBeNull");
        assert!(universe.contains(&target));
        assert_eq!(
            universe.covering_groups(&target).collect::<Vec<_>>(),
            ["PropertyTest::PropertyValidationOnAddExceptionConsistency::Deep"]
        );
    }

    #[test]
    fn repeated_claims_record_every_claimant() {
        let groups = [
            TestGroup::new("B").covers("G", ["op"]),
            TestGroup::new("A").covers("G", ["op", "op"]),
        ];
        let universe = scan_coverage(&groups).unwrap();
        assert_eq!(universe.len(), 1);
        assert_eq!(
            universe.covering_groups(&id("G#op")).collect::<Vec<_>>(),
            ["A", "B"]
        );
        assert_eq!(universe.covering_groups(&id("G#other")).count(), 0);
    }

    #[test]
    fn malformed_declaration_names_the_test_group() {
        let suite = TestGroup::new("Outer").child(TestGroup::new("Inner").covers("", ["op"]));
        let err = scan_coverage(&[suite]).unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::MalformedDeclaration { ref test_group, .. } if test_group == "Outer::Inner"
            ),
            "{err:?}"
        );

        let err = scan_coverage(&[TestGroup::new("T").covers("G", ["a#b"])]).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDeclaration { .. }));
    }

    #[test]
    fn merge_is_a_union() {
        let left = scan_coverage(&[TestGroup::new("L").covers("G", ["a", "b"])]).unwrap();
        let right = scan_coverage(&[TestGroup::new("R").covers("G", ["b", "c"])]).unwrap();

        let mut lr = left.clone();
        lr.merge(right.clone());
        let mut rl = right;
        rl.merge(left);

        assert_eq!(lr, rl);
        assert_eq!(lr.len(), 3);
        assert_eq!(lr.covering_groups(&id("G#b")).collect::<Vec<_>>(), ["L", "R"]);
    }
}
