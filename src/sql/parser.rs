//! SELECT statement parsing over the sqlparser AST.
//!
//! The accepted dialect is deliberately narrow: a single-table SELECT with
//! an optional WHERE conjunction of simple comparisons. Anything else is
//! rejected up front, never partially translated.

use sqlparser::ast::{
    BinaryOperator, Expr, Select, SetExpr, Statement, TableFactor, UnaryOperator,
};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use crate::error::{Result, TranslateError};

use super::ast::{FilterOperator, FilterPredicate, ParsedSelect};

/// Parse a SELECT statement into its intermediate structure.
///
/// Fails with a syntax error when the statement is not a SELECT, the FROM
/// clause contains a join or a sub-query, the WHERE clause contains an OR
/// or a NOT node, or a WHERE comparison is of an unsupported kind.
pub fn parse(text: &str) -> Result<ParsedSelect> {
    debug!(sql = %text, "parsing select statement");

    let statements = Parser::parse_sql(&GenericDialect {}, text)
        .map_err(|e| TranslateError::Syntax(e.to_string()))?;

    let statement = match statements.as_slice() {
        [statement] => statement,
        _ => {
            return Err(TranslateError::Syntax(
                "expected exactly one SQL statement".to_string(),
            ))
        }
    };

    let query = match statement {
        Statement::Query(query) => query,
        _ => {
            return Err(TranslateError::Syntax(
                "only SELECT SQL statements are supported".to_string(),
            ))
        }
    };

    match query.body.as_ref() {
        SetExpr::Select(select) => walk_select(select),
        _ => Err(TranslateError::Syntax(
            "only plain SELECT queries are supported".to_string(),
        )),
    }
}

fn walk_select(select: &Select) -> Result<ParsedSelect> {
    // Select items are carried as opaque text; expressions and functions
    // are never semantically parsed here.
    let columns: Vec<String> = select
        .projection
        .iter()
        .map(|item| item.to_string().replace('"', ""))
        .collect();

    let table = parse_from(select)?;

    let mut filters = Vec::new();
    if let Some(selection) = &select.selection {
        collect_predicates(selection, &mut filters)?;
    }

    Ok(ParsedSelect {
        columns,
        table,
        filters,
    })
}

/// Extract the single permitted table reference from the FROM clause.
fn parse_from(select: &Select) -> Result<String> {
    let table_with_joins = match select.from.as_slice() {
        [t] => t,
        [] => {
            return Err(TranslateError::Syntax(
                "a FROM clause with exactly one table is required".to_string(),
            ))
        }
        _ => {
            return Err(TranslateError::Syntax(
                "JOIN queries aren't supported".to_string(),
            ))
        }
    };

    if !table_with_joins.joins.is_empty() {
        return Err(TranslateError::Syntax(
            "JOIN queries aren't supported".to_string(),
        ));
    }

    match &table_with_joins.relation {
        TableFactor::Table { name, .. } => Ok(name.to_string().replace('"', "")),
        TableFactor::Derived { .. } => Err(TranslateError::Syntax(
            "subqueries aren't supported".to_string(),
        )),
        TableFactor::NestedJoin { .. } => Err(TranslateError::Syntax(
            "JOIN queries aren't supported".to_string(),
        )),
        other => Err(TranslateError::Syntax(format!(
            "unsupported FROM clause: {}",
            other
        ))),
    }
}

/// Walk the WHERE tree as a flat conjunction.
///
/// Recognized comparison leaves are appended in traversal order; AND nodes
/// and parentheses are recursed through; an OR or NOT node anywhere in the
/// tree aborts the walk, as does any comparison of an unsupported kind.
fn collect_predicates(expr: &Expr, out: &mut Vec<FilterPredicate>) -> Result<()> {
    match expr {
        Expr::Nested(inner) => collect_predicates(inner, out),

        Expr::UnaryOp {
            op: UnaryOperator::Not,
            ..
        } => Err(TranslateError::Syntax(
            "NOT logical operators aren't supported".to_string(),
        )),

        Expr::BinaryOp { left, op, right } => {
            let operator = match op {
                BinaryOperator::And => {
                    collect_predicates(left, out)?;
                    return collect_predicates(right, out);
                }
                BinaryOperator::Or => {
                    return Err(TranslateError::Syntax(
                        "OR logical operators aren't supported".to_string(),
                    ))
                }
                BinaryOperator::Eq => FilterOperator::Equal,
                BinaryOperator::NotEq => FilterOperator::NotEqual,
                BinaryOperator::Gt => FilterOperator::Greater,
                BinaryOperator::GtEq => FilterOperator::GreaterOrEqual,
                BinaryOperator::Lt => FilterOperator::Less,
                BinaryOperator::LtEq => FilterOperator::LessOrEqual,
                _ => {
                    return Err(TranslateError::Syntax(format!(
                        "unsupported WHERE comparison '{}'",
                        expr
                    )))
                }
            };

            out.push(FilterPredicate::new(
                operator,
                column_text(left),
                vec![value_text(right)],
            ));
            Ok(())
        }

        Expr::InList {
            expr: column,
            list,
            negated,
        } => {
            let operator = if *negated {
                FilterOperator::NotIn
            } else {
                FilterOperator::In
            };
            let values = list.iter().map(value_text).collect();
            out.push(FilterPredicate::new(operator, column_text(column), values));
            Ok(())
        }

        Expr::InSubquery { .. } | Expr::Subquery(_) => Err(TranslateError::Syntax(
            "subqueries aren't supported".to_string(),
        )),

        other => Err(TranslateError::Syntax(format!(
            "unsupported WHERE comparison '{}'",
            other
        ))),
    }
}

/// Textual rendering of a column reference with quote characters stripped.
fn column_text(expr: &Expr) -> String {
    expr.to_string().replace('"', "")
}

/// Textual rendering of a literal value with quote characters stripped.
fn value_text(expr: &Expr) -> String {
    expr.to_string().replace('\'', "")
}
