//! Intermediate structures produced by the SQL statement parser.

use serde::{Deserialize, Serialize};

/// The closed set of WHERE comparison operators.
///
/// `Between` and `NotBetween` are part of the operator domain but are
/// never produced by the parser and never accepted by filter resolution;
/// a BETWEEN clause is rejected as an unsupported comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    In,
    NotIn,
    Between,
    NotBetween,
}

impl FilterOperator {
    /// The SQL rendering of this operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "=",
            FilterOperator::NotEqual => "<>",
            FilterOperator::Greater => ">",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::Less => "<",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::In => "IN",
            FilterOperator::NotIn => "NOT IN",
            FilterOperator::Between => "BETWEEN",
            FilterOperator::NotBetween => "NOT BETWEEN",
        }
    }

    /// True for the single-value comparison operators legal on metrics.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            FilterOperator::Equal
                | FilterOperator::NotEqual
                | FilterOperator::Greater
                | FilterOperator::GreaterOrEqual
                | FilterOperator::Less
                | FilterOperator::LessOrEqual
        )
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One WHERE predicate: `column <op> values`.
///
/// Values are carried as raw text with enclosing quotes stripped; typing
/// happens later, during catalog resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub operator: FilterOperator,
    pub column: String,
    pub values: Vec<String>,
}

impl FilterPredicate {
    pub fn new(
        operator: FilterOperator,
        column: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self {
            operator,
            column: column.into(),
            values,
        }
    }
}

/// A parsed SELECT statement.
///
/// Columns are the literal textual renderings of the select items with
/// quote characters stripped (a `"Title"::TYPE` cast survives as
/// `Title::TYPE`). Exactly one table reference is permitted, and the
/// filters appear in WHERE traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSelect {
    pub columns: Vec<String>,
    pub table: String,
    pub filters: Vec<FilterPredicate>,
}
