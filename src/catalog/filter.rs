//! Resolved filters and the backend predicate union.

use serde::{Deserialize, Serialize};

use crate::sql::FilterOperator;

use super::entry::CatalogEntry;

/// The backend-ready form of a resolved filter.
///
/// Metric filters become numeric comparisons; attribute (and any other
/// non-metric) filters become element value sets. These two cases are the
/// whole surface the execution layer consumes, independent of any backend
/// SDK's filter classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BackendPredicate {
    /// `column <op> value`, metric kind only.
    Comparison {
        operator: FilterOperator,
        value: f64,
    },
    /// A value-set membership test, non-metric kinds only. `included` is
    /// true for Equal and false for NotEqual.
    ValueSet {
        included: bool,
        values: Vec<String>,
    },
}

/// A WHERE predicate resolved against the catalog.
///
/// Carries the resolved entry and the original operator and literal
/// values alongside the backend predicate, so the execution layer can
/// report the filter back in the terms the query used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFilter {
    pub entry: CatalogEntry,
    pub operator: FilterOperator,
    pub values: Vec<String>,
    pub predicate: BackendPredicate,
}
