//! SQL statement parsing.
//!
//! Turns SELECT text into an intermediate [`ParsedSelect`] structure:
//! its columns as opaque text, exactly one table reference, and the WHERE
//! predicates in traversal order. The accepted grammar is
//!
//! ```text
//! SELECT <col>[, <col>...] FROM <table>
//!   [WHERE <predicate> [AND <predicate>]...]
//! ```
//!
//! with predicates over `=`, `<>`, `>`, `>=`, `<`, `<=`, `IN` and
//! `NOT IN`, and columns written as `"Title"` or `"Title"::TYPE`.
//! OR, NOT, JOINs and subqueries are rejected with a syntax error.

pub mod ast;
pub mod parser;

pub use ast::{FilterOperator, FilterPredicate, ParsedSelect};
pub use parser::parse;
