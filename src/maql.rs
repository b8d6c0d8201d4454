//! MAQL metric-definition DDL parsing.
//!
//! Handles the three DDL statements the driver accepts:
//!
//! ```text
//! CREATE METRIC "<name>" AS <maql-expr> [;]
//! ALTER  METRIC "<name>" AS <maql-expr> [;]
//! DROP   METRIC "<name>" [;]
//! ```
//!
//! The MAQL expression itself is carried verbatim for the backend; the
//! parser only extracts what the catalog needs to qualify it: every
//! double-quoted token is a referenced object title, and the region after
//! the `WHERE` keyword pairs attribute-element literal values (single
//! quoted) with the nearest preceding attribute name (double quoted).

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, TranslateError};

static CREATE_ALTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*(create|alter)\s+metric\s+"(.+?)"\s+as\s+(.+?)\s*;?\s*$"#).unwrap()
});

static DROP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^\s*drop\s+metric\s+"(.+?)"\s*;?\s*$"#).unwrap());

/// A referenced object title, or an attribute-element literal value.
static QUOTED_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap());

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

static WHERE_KEYWORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwhere\b").unwrap());

/// A parsed CREATE/ALTER METRIC statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMetricStatement {
    /// The metric name.
    pub name: String,
    /// The raw MAQL expression, passed through to the backend.
    pub expression: String,
    /// Titles of every object the expression references.
    pub object_titles: HashSet<String>,
    /// Attribute-element literal values used in the WHERE region.
    pub element_values: HashSet<String>,
    /// Each element value mapped to the attribute title that owns it.
    pub element_attribute: HashMap<String, String>,
}

/// Parse a `CREATE METRIC` or `ALTER METRIC` statement.
///
/// Matching is case-insensitive and newlines are normalized to spaces
/// first; anything that does not fit the grammar is a syntax error.
pub fn parse_create_or_alter_metric(text: &str) -> Result<ParsedMetricStatement> {
    debug!(maql = %text, "parsing create/alter metric statement");

    let normalized = text.replace('\n', " ");
    let caps = CREATE_ALTER_PATTERN.captures(&normalized).ok_or_else(|| {
        TranslateError::Syntax(format!("wrong CREATE METRIC syntax: '{}'", text))
    })?;

    parse_metric_expression(&caps[2], &caps[3])
}

/// Parse a `DROP METRIC` statement, returning the metric name.
pub fn parse_drop_metric(text: &str) -> Result<String> {
    debug!(maql = %text, "parsing drop metric statement");

    let normalized = text.replace('\n', " ");
    let caps = DROP_PATTERN
        .captures(&normalized)
        .ok_or_else(|| TranslateError::Syntax(format!("wrong DROP METRIC syntax: '{}'", text)))?;

    Ok(caps[1].to_string())
}

/// Extract the referenced titles and element filters from a MAQL metric
/// expression.
///
/// The WHERE region is scanned left to right as a fold carrying the most
/// recently seen attribute name; each single-quoted value is recorded
/// against that attribute. A value seen before any attribute name cannot
/// be owned and is a syntax error. An expression without a WHERE keyword
/// is legal and yields no element filters.
pub fn parse_metric_expression(name: &str, expression: &str) -> Result<ParsedMetricStatement> {
    let object_titles: HashSet<String> = TITLE_PATTERN
        .captures_iter(expression)
        .map(|caps| caps[1].to_string())
        .collect();

    let mut element_values = HashSet::new();
    let mut element_attribute = HashMap::new();

    if let Some(keyword) = WHERE_KEYWORD_PATTERN.find(expression) {
        let region = &expression[keyword.end()..];
        let mut current_attribute: Option<&str> = None;

        for caps in QUOTED_TOKEN_PATTERN.captures_iter(region) {
            if let Some(attribute) = caps.get(1) {
                current_attribute = Some(attribute.as_str());
            } else if let Some(value) = caps.get(2) {
                let attribute = current_attribute.ok_or_else(|| {
                    TranslateError::Syntax(format!(
                        "wrong WHERE syntax: the '{}' value can't be matched with any attribute",
                        value.as_str()
                    ))
                })?;
                element_values.insert(value.as_str().to_string());
                element_attribute.insert(value.as_str().to_string(), attribute.to_string());
            }
        }
    }

    Ok(ParsedMetricStatement {
        name: name.to_string(),
        expression: expression.to_string(),
        object_titles,
        element_values,
        element_attribute,
    })
}
