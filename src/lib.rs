//! # afmql
//!
//! SQL and MAQL translation core for analytical workspace catalogs.
//!
//! A restricted SQL dialect and a MAQL metric-definition DDL dialect are
//! translated into a structured analytical-query representation, resolved
//! against a catalog of named, typed business objects (metrics,
//! attributes, facts, display forms). The crate is the query-translation
//! core behind a SQL-like client interface to an analytical backend; the
//! result cursor, the network clients and the session lifecycle live
//! outside it.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            SELECT / CREATE METRIC statement text         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql::parse | maql::parse_*]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ParsedSelect / ParsedMetricStatement (intermediate)  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [catalog resolution]
//! ┌─────────────────────────────────────────────────────────┐
//! │   ordered CatalogEntry columns + ResolvedFilter list     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │          external query executor / result cursor         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! All parsing and resolution is synchronous and side-effect-free; the
//! [`catalog::Catalog`] is the only stateful piece and is immutable once
//! populated.

pub mod catalog;
pub mod datatype;
pub mod error;
pub mod maql;
pub mod sql;

pub use error::{Result, TranslateError};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{
        AttributeMeta, BackendPredicate, Catalog, CatalogEntry, Namespace, ObjectKind,
        ObjectMeta, ResolvedFilter,
    };
    pub use crate::datatype::{parse_datatype_literal, DatatypeLiteral, TypeCode};
    pub use crate::error::{Result, TranslateError};
    pub use crate::maql::ParsedMetricStatement;
    pub use crate::sql::{FilterOperator, FilterPredicate, ParsedSelect};
}
