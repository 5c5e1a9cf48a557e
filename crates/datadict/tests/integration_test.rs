//! Integration tests for datadict.

use std::io::Write;
use tempfile::NamedTempFile;

use datadict::glossary::NO_DEFINITION;
use datadict::input::{Column, DataType, Value};
use datadict::quality::{IssueKind, QualityBand, Severity};
use datadict::{BusinessGlossary, Config, DataTable, DictError, MatchType, QualityScore, Session};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn column_with_nulls(name: &str, rows: usize, nulls: usize) -> Column {
    let values = (0..rows)
        .map(|i| if i < nulls { Value::Null } else { Value::Int(i as i64) })
        .collect();
    Column::new(name, values)
}

const GLOSSARY: &str = r#"
terms:
  email:
    business_name: Email Address
    definition: Primary contact email for the customer
    owner: Marketing
    pii: true
    examples: [a@example.com]
  cust_id:
    business_name: Customer ID
    definition: Unique customer identifier
    owner: Sales
  plan_tier:
    business_name: Plan Tier
"#;

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_run_csv_file() {
    let content = "customer_id,email,age,signup_date\n\
                   1,ann@example.com,34,2024-01-05\n\
                   2,bo@example.com,NA,2024-02-11\n\
                   3,cy@example.com,29,2024-03-20\n";
    let file = create_test_file(content, ".csv");

    let glossary = BusinessGlossary::from_yaml_str(GLOSSARY).expect("Glossary failed");
    let mut session = Session::new(Config::default(), glossary);
    let (source, output) = session
        .run_file(file.path(), Some("customers"), None)
        .expect("Run failed");

    assert_eq!(source.format, "csv");
    assert!(source.hash.starts_with("sha256:"));

    let dict = output.dictionary;
    assert_eq!(dict.dataset_name, "customers");
    assert_eq!(dict.overview.record_count, 3);
    assert_eq!(dict.overview.field_count, 4);

    let email = dict.column("email").expect("email column");
    assert!(email.is_pii);
    assert_eq!(email.term.match_type, MatchType::Exact);
    assert_eq!(email.owner.as_deref(), Some("Marketing"));

    // "customer_id" equals the comparable form of the "Customer ID" business name
    let customer = dict.column("customer_id").expect("customer_id column");
    assert_eq!(customer.term.match_type, MatchType::Fuzzy);
    assert_eq!(customer.term.matched_term.as_deref(), Some("cust_id"));

    let signup = dict.column("signup_date").expect("signup_date column");
    assert_eq!(signup.data_type.native, DataType::DateTime);
    assert_eq!(signup.data_type.sql, "TIMESTAMP");
    assert_eq!(signup.term.match_type, MatchType::None);

    assert_eq!(output.profile.basic_info.row_count, 3);
    assert_eq!(session.dataset_names().collect::<Vec<_>>(), vec!["customers"]);
}

#[test]
fn test_run_file_names_dataset_after_stem() {
    let file = create_test_file("sample_id\tdiagnosis\nS001\tCD\nS002\tUC\n", ".tsv");
    let mut session = Session::default();
    let (source, output) = session.run_file(file.path(), None, None).expect("Run failed");

    assert_eq!(source.format, "tsv");
    assert_eq!(output.dictionary.dataset_name, source.stem());
}

// =============================================================================
// Documented examples
// =============================================================================

#[test]
fn test_unmapped_when_only_key_is_similar() {
    let glossary = BusinessGlossary::from_yaml_str(
        "terms:\n  cust_id:\n    business_name: Cust Ident\n    pii: false\n",
    )
    .unwrap();
    let mut session = Session::new(Config::default(), glossary);
    let mapped = session.map_columns("d", &["customer_id"]).unwrap();

    let term = mapped.term("customer_id").unwrap();
    assert_eq!(term.match_type, MatchType::None);
    assert_eq!(term.business_name, "Customer Id");
    assert_eq!(term.definition, NO_DEFINITION);
}

#[test]
fn test_null_percentage_example() {
    let table = DataTable::new(vec![column_with_nulls("age", 10, 2)]).unwrap();
    let mut session = Session::default();
    let profile = session.profile_dataset("people", &table).unwrap();
    assert_eq!(profile.column("age").unwrap().null_percentage, 20.0);
}

#[test]
fn test_null_severity_examples() {
    let table = DataTable::new(vec![
        column_with_nulls("some_nulls", 20, 3),
        column_with_nulls("mostly_nulls", 20, 12),
        column_with_nulls("few_nulls", 20, 1),
    ])
    .unwrap();

    let mut session = Session::default();
    let issues = &session.profile_dataset("t", &table).unwrap().quality.quality_issues;

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].column, "some_nulls");
    assert_eq!(issues[0].issue, IssueKind::HighNullPercentage);
    assert_eq!(issues[0].severity, Severity::Medium);
    assert_eq!(issues[1].column, "mostly_nulls");
    assert_eq!(issues[1].severity, Severity::High);
}

#[test]
fn test_quality_score_example() {
    let score = QualityScore::compute(95.0, 1);
    assert_eq!(score.score, 90.0);
    assert_eq!(score.band, QualityBand::Excellent);
    assert_eq!(score.to_string(), "90% (Excellent)");
}

#[test]
fn test_numeric_stored_as_string() {
    let table = DataTable::new(vec![Column::with_type(
        "zip",
        DataType::Text,
        vec!["02139".into(), "10001".into(), Value::Null],
    )])
    .unwrap();

    let mut session = Session::default();
    let quality = &session.profile_dataset("t", &table).unwrap().quality;
    let kinds: Vec<IssueKind> = quality.quality_issues.iter().map(|i| i.issue).collect();
    assert_eq!(
        kinds,
        vec![IssueKind::HighNullPercentage, IssueKind::NumericStoredAsString]
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_empty_dataset_is_invalid_input() {
    let file = create_test_file("a,b\n", ".csv");
    let mut session = Session::default();
    let err = session.run_file(file.path(), Some("empty"), None).unwrap_err();
    assert!(matches!(err, DictError::InvalidInput(_)));
}

#[test]
fn test_unknown_dataset_not_found() {
    let session = Session::default();
    for result in [
        session.validate_mappings("ghost").map(|_| ()),
        session.pii_columns("ghost").map(|_| ()),
        session.export("ghost", "unused", &[]).map(|_| ()),
    ] {
        assert!(matches!(result, Err(DictError::NotFound { .. })));
    }
}

#[test]
fn test_glossary_without_terms_maps_nothing() {
    let glossary = BusinessGlossary::from_yaml_str("version: 2\n").unwrap();
    assert!(glossary.is_empty());

    let mut session = Session::new(Config::default(), glossary);
    let mapped = session.map_columns("d", &["email", "phone"]).unwrap();
    assert_eq!(mapped.mapped_columns, 0);
    assert_eq!(mapped.unmapped_columns, 2);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_changes_behavior() {
    let config = Config::from_yaml_str(
        "glossary:\n  auto_mapping: false\nprofiling:\n  quality_thresholds:\n    max_null_percentage: 25\n",
    )
    .unwrap();

    let glossary = BusinessGlossary::from_yaml_str(GLOSSARY).unwrap();
    let mut session = Session::new(config, glossary);
    let table = DataTable::new(vec![
        column_with_nulls("customer_id", 10, 2),
        column_with_nulls("email", 10, 0),
    ])
    .unwrap();

    let output = session.run("d", &table, None).unwrap();
    // 20% nulls is under the raised threshold
    assert!(output.profile.quality.quality_issues.is_empty());
    assert_eq!(output.glossary.mapped_columns, 1);

    let validation = session.validate_mappings("d").unwrap();
    assert_eq!(validation.mapping_coverage, 50.0);
}
