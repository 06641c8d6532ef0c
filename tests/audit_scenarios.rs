#![allow(missing_docs)]

//! End-to-end audit scenarios over a graph-structure error taxonomy.

#[macro_use]
mod common;

use errcov::{
    AuditResult, ConfigError, CoverageStatus, ErrorGroup, IgnoreList, OperationId,
    TaxonomyRegistry, TestGroup, run_audit,
};

const EDGE: &str = "Edge.Exceptions";

fn edge_registry() -> TaxonomyRegistry {
    TaxonomyRegistry::new([ErrorGroup::new(
        EDGE,
        ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"],
    )])
    .expect("edge registry")
}

fn structure_registry() -> TaxonomyRegistry {
    TaxonomyRegistry::new([
        ErrorGroup::new(
            EDGE,
            ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"],
        ),
        ErrorGroup::new(
            "Graph.Exceptions",
            [
                "argumentCanNotBeNull",
                "vertexWithIdAlreadyExists",
                "edgeWithIdAlreadyExists",
                "vertexLookupsNotSupported",
            ],
        ),
        ErrorGroup::new(
            "Property.Exceptions",
            ["propertyKeyIsReserved", "propertyValueCanNotBeNull"],
        ),
        ErrorGroup::new(
            "Graph.Variables.Exceptions",
            ["variableKeyCanNotBeEmpty", "variableValueCanNotBeNull"],
        ),
    ])
    .expect("structure registry")
}

fn structure_ignores() -> IgnoreList {
    IgnoreList::from_entries([
        // composed into other operations, never raised directly
        "Property.Exceptions#propertyKeyIsReserved",
        // general purpose, not tested on its own
        "Graph.Exceptions#argumentCanNotBeNull",
        // consistency test not written yet
        "Graph.Exceptions#vertexLookupsNotSupported",
    ])
    .expect("structure ignores")
}

fn structure_tests() -> Vec<TestGroup> {
    vec![
        TestGroup::new("EdgeTest").covers(EDGE, ["edgeRemovalNotSupported"]),
        TestGroup::new("VertexTest").covers(EDGE, ["edgeAdditionsNotSupported"]),
        TestGroup::new("GraphTest").covers(
            "Graph.Exceptions",
            ["vertexWithIdAlreadyExists", "edgeWithIdAlreadyExists"],
        ),
        TestGroup::new("PropertyTest").child(
            TestGroup::new("PropertyValidationOnAddExceptionConsistency")
                .covers("Property.Exceptions", ["propertyValueCanNotBeNull"]),
        ),
        TestGroup::new("VariablesTest")
            .child(
                TestGroup::new("VariableExceptionConsistency")
                    .covers("Graph.Variables.Exceptions", ["variableKeyCanNotBeEmpty"]),
            )
            .child(
                TestGroup::new("VariableValueConsistency")
                    .covers("Graph.Variables.Exceptions", ["variableValueCanNotBeNull"]),
            ),
    ]
}

fn residue_names(result: &AuditResult) -> Vec<&str> {
    result.residue().iter().map(OperationId::as_str).collect()
}

#[test]
fn ignored_removal_and_covered_addition_pass() {
    common::init_test_logging();
    test_phase!("ignored_removal_and_covered_addition_pass");

    let ignore = IgnoreList::from_entries(["Edge.Exceptions#edgeRemovalNotSupported"]).unwrap();
    let tests = [TestGroup::new("EdgeTest").covers(EDGE, ["edgeAdditionsNotSupported"])];
    let result = run_audit(&edge_registry(), &ignore, &tests).unwrap();

    assert_with_log!(result.passed(), "audit should pass", true, result.passed());
    assert!(result.residue().is_empty());
    test_complete!("ignored_removal_and_covered_addition_pass");
}

#[test]
fn no_declarations_fail_with_both_operations() {
    common::init_test_logging();
    test_phase!("no_declarations_fail_with_both_operations");

    let result = run_audit(&edge_registry(), &IgnoreList::new(), &[]).unwrap();

    assert_with_log!(!result.passed(), "audit should fail", false, result.passed());
    assert_eq!(
        residue_names(&result),
        [
            "Edge.Exceptions#edgeAdditionsNotSupported",
            "Edge.Exceptions#edgeRemovalNotSupported",
        ]
    );
    test_complete!("no_declarations_fail_with_both_operations");
}

#[test]
fn nested_sub_group_declaration_counts() {
    common::init_test_logging();
    test_phase!("nested_sub_group_declaration_counts");

    let tests = [TestGroup::new("EdgeTest").child(
        TestGroup::new("BasicEdgeTest").covers(
            EDGE,
            ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"],
        ),
    )];
    let result = run_audit(&edge_registry(), &IgnoreList::new(), &tests).unwrap();

    assert!(result.passed(), "{}", result.to_text());
    let entry = &result.entries()[0];
    assert_eq!(entry.status, CoverageStatus::Covered);
    assert_eq!(entry.tests, ["EdgeTest::BasicEdgeTest"]);
    test_complete!("nested_sub_group_declaration_counts");
}

#[test]
fn ignored_operations_are_never_residue() {
    common::init_test_logging();
    let registry = structure_registry();
    let ignore = structure_ignores();
    let result = run_audit(&registry, &ignore, &[]).unwrap();

    for id in ignore.iter() {
        assert!(
            !result.residue().contains(id),
            "ignored operation {id} reported as residue"
        );
    }
    assert_eq!(result.exempted().count(), ignore.len());
    assert_eq!(result.residue().len(), result.declared_count() - ignore.len());
}

#[test]
fn every_uncovered_operation_is_named() {
    common::init_test_logging();
    let mut tests = structure_tests();
    // Drop the variables suite: both of its operations become gaps.
    tests.retain(|group| group.name() != "VariablesTest");

    let result = run_audit(&structure_registry(), &structure_ignores(), &tests).unwrap();
    let gap = result.ensure_passed().unwrap_err();

    let message = gap.to_string();
    assert!(message.contains("Graph.Variables.Exceptions#variableKeyCanNotBeEmpty"));
    assert!(message.contains("Graph.Variables.Exceptions#variableValueCanNotBeNull"));
    assert_eq!(gap.uncovered().len(), 2);
}

#[test]
fn misspelled_declaration_does_not_mask_a_gap() {
    common::init_test_logging();
    let tests = [
        TestGroup::new("EdgeTest").covers(EDGE, ["edgeAdditionsNotSupported"]),
        TestGroup::new("Typo").covers(EDGE, ["edgeRemovalNotSupportd"]),
        TestGroup::new("WrongGroup").covers("Vertex.Exceptions", ["edgeRemovalNotSupported"]),
    ];
    let result = run_audit(&edge_registry(), &IgnoreList::new(), &tests).unwrap();

    assert_eq!(residue_names(&result), ["Edge.Exceptions#edgeRemovalNotSupported"]);
    let stale = result
        .stale_declarations()
        .iter()
        .map(OperationId::as_str)
        .collect::<Vec<_>>();
    assert_eq!(
        stale,
        [
            "Edge.Exceptions#edgeRemovalNotSupportd",
            "Vertex.Exceptions#edgeRemovalNotSupported",
        ]
    );
}

#[test]
fn full_structure_suite_passes() {
    common::init_test_logging();
    test_phase!("full_structure_suite_passes");

    let result = run_audit(&structure_registry(), &structure_ignores(), &structure_tests()).unwrap();

    assert!(result.passed(), "{}", result.to_text());
    assert!(result.stale_declarations().is_empty());
    assert!(result.stale_ignores().is_empty());
    assert_eq!(result.declared_count(), 10);
    test_complete!("full_structure_suite_passes");
}

#[test]
fn audit_is_idempotent() {
    common::init_test_logging();
    let registry = structure_registry();
    let ignore = structure_ignores();
    let tests = &structure_tests()[1..];

    let first = run_audit(&registry, &ignore, tests).unwrap();
    let second = run_audit(&registry, &ignore, tests).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_text(), second.to_text());
    assert_eq!(first.to_json(), second.to_json());
}

#[test]
fn duplicate_group_registration_is_fatal() {
    let err = TaxonomyRegistry::new([
        ErrorGroup::new(EDGE, ["edgeRemovalNotSupported"]),
        ErrorGroup::new(EDGE, ["edgeAdditionsNotSupported"]),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateGroup {
            name: EDGE.to_string()
        }
    );
}

#[test]
fn failing_report_text() {
    let ignore = IgnoreList::from_entries([
        "Edge.Exceptions#edgeRemovalNotSupported",
        "Vertex.Exceptions#vertexRemovalNotSupported",
    ])
    .unwrap();
    let tests = [TestGroup::new("GraphTest").covers(
        "Graph.Exceptions",
        ["vertexWithIdAlreadyExists", "vertexWithIdAlreadyExist"],
    )];
    let registry = TaxonomyRegistry::new([
        ErrorGroup::new(
            EDGE,
            ["edgeRemovalNotSupported", "edgeAdditionsNotSupported"],
        ),
        ErrorGroup::new("Graph.Exceptions", ["vertexWithIdAlreadyExists"]),
    ])
    .unwrap();
    let result = run_audit(&registry, &ignore, &tests).unwrap();

    insta::assert_snapshot!(result.to_text(), @r"
    coverage audit: FAIL (declared 3, covered 1, exempted 1, uncovered 1)
    Edge.Exceptions#edgeAdditionsNotSupported: <missing>
    Edge.Exceptions#edgeRemovalNotSupported: <ignored>
    Graph.Exceptions#vertexWithIdAlreadyExists: GraphTest
    stale declarations:
      - Graph.Exceptions#vertexWithIdAlreadyExist
    stale ignores:
      - Vertex.Exceptions#vertexRemovalNotSupported
    ");
}
