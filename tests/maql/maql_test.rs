//! Integration tests for the MAQL metric-definition parser.

use std::collections::HashSet;

use afmql::maql::{parse_create_or_alter_metric, parse_drop_metric, parse_metric_expression};
use afmql::TranslateError;

#[test]
fn test_create_metric_statement() {
    let parsed = parse_create_or_alter_metric(
        r#"CREATE METRIC "M1" AS SELECT "Revenue" WHERE "Region" = 'US'"#,
    )
    .unwrap();

    assert_eq!(parsed.name, "M1");
    assert_eq!(parsed.expression, r#"SELECT "Revenue" WHERE "Region" = 'US'"#);
    assert!(parsed.object_titles.contains("Revenue"));
    assert!(parsed.object_titles.contains("Region"));
    assert_eq!(parsed.element_values, HashSet::from(["US".to_string()]));
    assert_eq!(parsed.element_attribute.get("US").unwrap(), "Region");
}

#[test]
fn test_alter_metric_statement() {
    let parsed =
        parse_create_or_alter_metric(r#"ALTER METRIC "M1" AS SELECT AVG("Price");"#).unwrap();
    assert_eq!(parsed.name, "M1");
    assert_eq!(parsed.expression, r#"SELECT AVG("Price")"#);
}

#[test]
fn test_newlines_are_normalized() {
    let parsed = parse_create_or_alter_metric(
        "CREATE METRIC \"M1\"\nAS SELECT \"Revenue\"\nWHERE \"Region\" = 'US'",
    )
    .unwrap();
    assert_eq!(parsed.name, "M1");
    assert_eq!(parsed.element_attribute.get("US").unwrap(), "Region");
}

#[test]
fn test_create_metric_bad_syntax() {
    for text in [
        "CREATE METRIC M1 AS SELECT 1",
        r#"CREATE METRIC "M1" SELECT 1"#,
        r#"CREATE VIEW "M1" AS SELECT 1"#,
        "",
    ] {
        assert!(
            matches!(
                parse_create_or_alter_metric(text),
                Err(TranslateError::Syntax(_))
            ),
            "accepted: {:?}",
            text
        );
    }
}

#[test]
fn test_drop_metric_statement() {
    assert_eq!(parse_drop_metric(r#"DROP METRIC "M1""#).unwrap(), "M1");
    assert_eq!(parse_drop_metric(r#"  drop   metric "My Metric" ; "#).unwrap(), "My Metric");
    assert_eq!(parse_drop_metric("DROP\nMETRIC \"M1\";").unwrap(), "M1");
}

#[test]
fn test_drop_metric_bad_syntax() {
    assert!(parse_drop_metric(r#"DROP METRIC M1"#).is_err());
    assert!(parse_drop_metric(r#"DROP TABLE "M1""#).is_err());
}

#[test]
fn test_expression_titles_are_a_set() {
    let parsed = parse_metric_expression(
        "M",
        r#"SELECT SUM("Amount") / SUM("Amount") + "Revenue""#,
    )
    .unwrap();
    assert_eq!(
        parsed.object_titles,
        HashSet::from(["Amount".to_string(), "Revenue".to_string()])
    );
}

#[test]
fn test_where_keyword_is_case_insensitive() {
    let parsed =
        parse_metric_expression("M", r#"SELECT "Revenue" where "Region" = 'EU'"#).unwrap();
    assert_eq!(parsed.element_attribute.get("EU").unwrap(), "Region");
}

#[test]
fn test_no_where_means_no_element_filters() {
    let parsed = parse_metric_expression("M", r#"SELECT SUM("Amount")"#).unwrap();
    assert!(parsed.element_values.is_empty());
}

#[test]
fn test_values_attach_to_nearest_preceding_attribute() {
    let parsed = parse_metric_expression(
        "M",
        r#"SELECT "Revenue" WHERE "Region" IN ('US', 'EU') AND "Channel" = 'web'"#,
    )
    .unwrap();
    assert_eq!(parsed.element_attribute.get("US").unwrap(), "Region");
    assert_eq!(parsed.element_attribute.get("EU").unwrap(), "Region");
    assert_eq!(parsed.element_attribute.get("web").unwrap(), "Channel");
}

#[test]
fn test_orphan_value_is_a_syntax_error() {
    let err = parse_metric_expression("M", r#"SELECT "Revenue" WHERE 'US'"#).unwrap_err();
    assert!(matches!(err, TranslateError::Syntax(_)));
}
