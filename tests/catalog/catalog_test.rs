//! Integration tests for catalog population and resolution.
//!
//! These walk the full pipeline: SELECT text through the SQL parser into
//! column and filter resolution against a populated catalog.

use afmql::prelude::*;

fn sample_catalog() -> Catalog {
    Catalog::populate(
        vec![
            ObjectMeta::new("/gdc/md/w1/obj/1", "Revenue", "metric", "metric.revenue"),
            ObjectMeta::new("/gdc/md/w1/obj/5", "Margin", "metric", "metric.margin"),
        ],
        vec![
            AttributeMeta {
                attribute: ObjectMeta::new("/gdc/md/w1/obj/2", "Region", "attribute", "attr.region"),
                default_display_form: ObjectMeta::new(
                    "/gdc/md/w1/obj/3",
                    "Region",
                    "attributeDisplayForm",
                    "label.region",
                ),
            },
            AttributeMeta {
                attribute: ObjectMeta::new("/gdc/md/w1/obj/6", "Channel", "attribute", "attr.channel"),
                default_display_form: ObjectMeta::new(
                    "/gdc/md/w1/obj/7",
                    "Channel",
                    "attributeDisplayForm",
                    "label.channel",
                ),
            },
        ],
        vec![ObjectMeta::new("/gdc/md/w1/obj/4", "Amount", "fact", "fact.amount")],
    )
    .unwrap()
}

#[test]
fn test_resolve_columns_assigns_kind_defaults() {
    let catalog = sample_catalog();
    let parsed = afmql::sql::parse(r#"SELECT "Region", "Revenue" FROM "w1""#).unwrap();

    let columns = catalog.resolve_columns(&parsed).unwrap();
    assert_eq!(columns.len(), 2);

    assert_eq!(columns[0].kind, ObjectKind::DisplayForm);
    assert_eq!(
        columns[0].datatype.as_ref().unwrap(),
        &DatatypeLiteral::new("VARCHAR", 255, 0)
    );

    assert_eq!(columns[1].kind, ObjectKind::Metric);
    assert_eq!(
        columns[1].datatype.as_ref().unwrap(),
        &DatatypeLiteral::new("DECIMAL", 15, 2)
    );
}

#[test]
fn test_explicit_cast_overrides_default_datatype() {
    let catalog = sample_catalog();
    let parsed = afmql::sql::parse(r#"SELECT "Revenue"::DECIMAL(13,2) FROM "w1""#).unwrap();

    let columns = catalog.resolve_columns(&parsed).unwrap();
    assert_eq!(
        columns[0].datatype.as_ref().unwrap(),
        &DatatypeLiteral::new("DECIMAL", 13, 2)
    );
}

#[test]
fn test_cast_to_unknown_type_fails() {
    let catalog = sample_catalog();
    let parsed = afmql::sql::parse(r#"SELECT "Revenue"::BLOB FROM "w1""#).unwrap();
    assert!(matches!(
        catalog.resolve_columns(&parsed),
        Err(TranslateError::UnsupportedType(_))
    ));
}

#[test]
fn test_cast_does_not_leak_into_the_index() {
    let catalog = sample_catalog();
    let cast = afmql::sql::parse(r#"SELECT "Revenue"::INTEGER FROM "w1""#).unwrap();
    let plain = afmql::sql::parse(r#"SELECT "Revenue" FROM "w1""#).unwrap();

    let _ = catalog.resolve_columns(&cast).unwrap();
    let columns = catalog.resolve_columns(&plain).unwrap();
    assert_eq!(
        columns[0].datatype.as_ref().unwrap(),
        &DatatypeLiteral::new("DECIMAL", 15, 2)
    );
}

#[test]
fn test_column_order_matches_select_order() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Channel", "Revenue", "Region" FROM "w1""#).unwrap();
    let titles: Vec<String> = catalog
        .resolve_columns(&parsed)
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["Channel", "Revenue", "Region"]);
}

#[test]
fn test_unknown_column_not_found() {
    let catalog = sample_catalog();
    let parsed = afmql::sql::parse(r#"SELECT "Nonsense" FROM "w1""#).unwrap();
    assert!(matches!(
        catalog.resolve_columns(&parsed),
        Err(TranslateError::NotFound(_))
    ));
}

#[test]
fn test_metric_comparison_filters() {
    let catalog = sample_catalog();

    let cases = [
        ("=", FilterOperator::Equal),
        ("<>", FilterOperator::NotEqual),
        (">", FilterOperator::Greater),
        (">=", FilterOperator::GreaterOrEqual),
        ("<", FilterOperator::Less),
        ("<=", FilterOperator::LessOrEqual),
    ];
    for (sql_op, operator) in cases {
        let parsed = afmql::sql::parse(&format!(
            r#"SELECT "Revenue" FROM "w1" WHERE "Revenue" {} '1000'"#,
            sql_op
        ))
        .unwrap();
        let filters = catalog.resolve_filters(&parsed).unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters[0].predicate,
            BackendPredicate::Comparison {
                operator,
                value: 1000.0
            },
            "operator {}",
            sql_op
        );
    }
}

#[test]
fn test_in_on_metric_is_unsupported() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Revenue" FROM "w1" WHERE "Revenue" IN ('1','2')"#).unwrap();
    assert!(matches!(
        catalog.resolve_filters(&parsed),
        Err(TranslateError::UnsupportedOperator(_))
    ));
}

#[test]
fn test_non_numeric_metric_value_is_a_syntax_error() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Revenue" FROM "w1" WHERE "Revenue" > 'lots'"#).unwrap();
    assert!(matches!(
        catalog.resolve_filters(&parsed),
        Err(TranslateError::Syntax(_))
    ));
}

#[test]
fn test_attribute_equal_filter_is_an_included_value_set() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Region" FROM "w1" WHERE "Region" = 'US'"#).unwrap();
    let filters = catalog.resolve_filters(&parsed).unwrap();
    assert_eq!(
        filters[0].predicate,
        BackendPredicate::ValueSet {
            included: true,
            values: vec!["US".to_string()]
        }
    );
}

#[test]
fn test_attribute_not_equal_filter_is_an_excluded_value_set() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Region" FROM "w1" WHERE "Region" <> 'US'"#).unwrap();
    let filters = catalog.resolve_filters(&parsed).unwrap();
    assert_eq!(
        filters[0].predicate,
        BackendPredicate::ValueSet {
            included: false,
            values: vec!["US".to_string()]
        }
    );
}

#[test]
fn test_attribute_comparison_is_unsupported() {
    let catalog = sample_catalog();
    for sql_op in [">", ">=", "<", "<="] {
        let parsed = afmql::sql::parse(&format!(
            r#"SELECT "Region" FROM "w1" WHERE "Region" {} 'M'"#,
            sql_op
        ))
        .unwrap();
        assert!(
            matches!(
                catalog.resolve_filters(&parsed),
                Err(TranslateError::UnsupportedOperator(_))
            ),
            "operator {}",
            sql_op
        );
    }
}

#[test]
fn test_filter_order_matches_predicate_order() {
    let catalog = sample_catalog();
    let parsed = afmql::sql::parse(
        r#"SELECT "Revenue" FROM "w1" WHERE "Region" = 'US' AND "Revenue" > '10' AND "Channel" <> 'web'"#,
    )
    .unwrap();
    let filters = catalog.resolve_filters(&parsed).unwrap();
    let titles: Vec<&str> = filters.iter().map(|f| f.entry.title.as_str()).collect();
    assert_eq!(titles, vec!["Region", "Revenue", "Channel"]);
}

#[test]
fn test_resolved_filter_keeps_original_operator_and_values() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Region" FROM "w1" WHERE "Region" = 'US'"#).unwrap();
    let filters = catalog.resolve_filters(&parsed).unwrap();
    assert_eq!(filters[0].operator, FilterOperator::Equal);
    assert_eq!(filters[0].values, vec!["US".to_string()]);
    assert_eq!(filters[0].entry.qualifier, "/gdc/md/w1/obj/3");
}

#[test]
fn test_attribute_membership_list_is_unsupported() {
    let catalog = sample_catalog();
    let parsed =
        afmql::sql::parse(r#"SELECT "Region" FROM "w1" WHERE "Region" IN ('US','EU')"#).unwrap();
    assert!(matches!(
        catalog.resolve_filters(&parsed),
        Err(TranslateError::UnsupportedOperator(_))
    ));
}

#[test]
fn test_catalog_from_json_snapshot() {
    let snapshot = r#"{
        "metrics": [
            {"uri": "/gdc/md/w1/obj/1", "title": "Revenue", "category": "metric", "identifier": "metric.revenue"}
        ],
        "attributes": [
            {
                "attribute": {"uri": "/gdc/md/w1/obj/2", "title": "Region", "category": "attribute", "identifier": "attr.region"},
                "default_display_form": {"uri": "/gdc/md/w1/obj/3", "title": "Region", "category": "attributeDisplayForm", "identifier": "label.region"}
            }
        ],
        "facts": [
            {"uri": "/gdc/md/w1/obj/4", "title": "Amount", "category": "fact", "identifier": "fact.amount"}
        ]
    }"#;

    let catalog = Catalog::from_snapshot_json(snapshot).unwrap();
    let revenue = catalog
        .resolve_title(Namespace::QuerySurface, "Revenue")
        .unwrap();
    assert_eq!(revenue.kind, ObjectKind::Metric);

    let schemas: Vec<String> = catalog.schemas().into_iter().collect();
    assert_eq!(schemas, vec!["w1".to_string()]);

    assert!(Catalog::from_snapshot_json("{not json").is_err());
}
