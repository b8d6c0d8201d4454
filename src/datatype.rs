//! SQL datatype tables and literal parsing.
//!
//! The catalog advertises a closed set of SQL datatypes. This module maps
//! each canonical name to a stable generic type code and to the native
//! type name the result cursor reports, and parses datatype literals of
//! the form `NAME`, `NAME(size)` or `NAME(size,precision)` as they appear
//! in `::TYPE` cast suffixes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError};

/// Pattern for a datatype literal: `NAME`, `NAME(size)` or `NAME(size,precision)`.
static DATATYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)\s*(?:\(\s*([0-9]+)\s*(?:,\s*([0-9]+)\s*)?\))?\s*$").unwrap()
});

/// The closed set of SQL datatypes the catalog supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCode {
    Varchar,
    Numeric,
    Decimal,
    Double,
    Float,
    Integer,
    Char,
    Date,
    Time,
    /// Accepted under both the `DATETIME` and `TIMESTAMP` spellings.
    Timestamp,
}

impl TypeCode {
    /// Look up a datatype by its SQL name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "VARCHAR" => Ok(TypeCode::Varchar),
            "NUMERIC" => Ok(TypeCode::Numeric),
            "DECIMAL" => Ok(TypeCode::Decimal),
            "DOUBLE" => Ok(TypeCode::Double),
            "FLOAT" => Ok(TypeCode::Float),
            "INTEGER" => Ok(TypeCode::Integer),
            "CHAR" => Ok(TypeCode::Char),
            "DATE" => Ok(TypeCode::Date),
            "TIME" => Ok(TypeCode::Time),
            "DATETIME" | "TIMESTAMP" => Ok(TypeCode::Timestamp),
            _ => Err(TranslateError::UnsupportedType(name.to_string())),
        }
    }

    /// The canonical SQL name of this datatype.
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Varchar => "VARCHAR",
            TypeCode::Numeric => "NUMERIC",
            TypeCode::Decimal => "DECIMAL",
            TypeCode::Double => "DOUBLE",
            TypeCode::Float => "FLOAT",
            TypeCode::Integer => "INTEGER",
            TypeCode::Char => "CHAR",
            TypeCode::Date => "DATE",
            TypeCode::Time => "TIME",
            TypeCode::Timestamp => "TIMESTAMP",
        }
    }

    /// A stable generic type code, compatible with the common SQL type
    /// constants clients already know.
    pub fn generic_code(&self) -> i32 {
        match self {
            TypeCode::Varchar => 12,
            TypeCode::Numeric => 2,
            TypeCode::Decimal => 3,
            TypeCode::Double => 8,
            TypeCode::Float => 6,
            TypeCode::Integer => 4,
            TypeCode::Char => 1,
            TypeCode::Date => 91,
            TypeCode::Time => 92,
            TypeCode::Timestamp => 93,
        }
    }

    /// The native type name reported in result metadata.
    pub fn native_type(&self) -> &'static str {
        match self {
            TypeCode::Varchar | TypeCode::Char => "String",
            TypeCode::Numeric | TypeCode::Decimal | TypeCode::Double => "f64",
            TypeCode::Float => "f32",
            TypeCode::Integer => "i32",
            TypeCode::Date => "NaiveDate",
            TypeCode::Time => "NaiveTime",
            TypeCode::Timestamp => "NaiveDateTime",
        }
    }
}

/// A parsed datatype literal, e.g. `VARCHAR(255)` or `DECIMAL(13,2)`.
///
/// `size` and `precision` are 0 when the parenthesized group is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatatypeLiteral {
    pub name: String,
    pub size: u32,
    pub precision: u32,
}

impl DatatypeLiteral {
    pub fn new(name: impl Into<String>, size: u32, precision: u32) -> Self {
        Self {
            name: name.into(),
            size,
            precision,
        }
    }

    /// Resolve the literal's name through the datatype table.
    pub fn type_code(&self) -> Result<TypeCode> {
        TypeCode::from_name(&self.name)
    }
}

impl fmt::Display for DatatypeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size == 0 && self.precision == 0 {
            write!(f, "{}", self.name)
        } else if self.precision == 0 {
            write!(f, "{}({})", self.name, self.size)
        } else {
            write!(f, "{}({},{})", self.name, self.size, self.precision)
        }
    }
}

/// Parse a datatype literal of the form `NAME[(size[,precision])]`.
///
/// The grammar is exhaustive: any text that does not match it is a syntax
/// error, never silently accepted.
pub fn parse_datatype_literal(text: &str) -> Result<DatatypeLiteral> {
    let caps = DATATYPE_PATTERN
        .captures(text)
        .ok_or_else(|| TranslateError::Syntax(format!("invalid datatype literal '{}'", text)))?;

    let name = caps[1].to_string();
    let size = caps
        .get(2)
        .map(|m| m.as_str().parse::<u32>())
        .transpose()
        .map_err(|_| TranslateError::Syntax(format!("invalid datatype size in '{}'", text)))?
        .unwrap_or(0);
    let precision = caps
        .get(3)
        .map(|m| m.as_str().parse::<u32>())
        .transpose()
        .map_err(|_| TranslateError::Syntax(format!("invalid datatype precision in '{}'", text)))?
        .unwrap_or(0);

    Ok(DatatypeLiteral {
        name,
        size,
        precision,
    })
}

/// Parse a numeric literal value, tolerating surrounding whitespace and
/// grouping commas (`1,000.5`).
pub fn parse_numeric(text: &str) -> Result<f64> {
    let cleaned = text.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .map_err(|_| TranslateError::Syntax(format!("'{}' is not a valid numeric value", text)))
}
