//! Catalog entries and the metadata snapshot items they are built from.

use serde::{Deserialize, Serialize};

use crate::datatype::DatatypeLiteral;
use crate::error::{Result, TranslateError};

/// The kind of an addressable analytical object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Metric,
    Attribute,
    Fact,
    DisplayForm,
}

impl ObjectKind {
    /// The metadata category string for this kind.
    pub fn category(&self) -> &'static str {
        match self {
            ObjectKind::Metric => "metric",
            ObjectKind::Attribute => "attribute",
            ObjectKind::Fact => "fact",
            ObjectKind::DisplayForm => "attributeDisplayForm",
        }
    }

    /// Parse a metadata category string, case-insensitively.
    pub fn from_category(category: &str) -> Result<Self> {
        match category.to_ascii_lowercase().as_str() {
            "metric" => Ok(ObjectKind::Metric),
            "attribute" => Ok(ObjectKind::Attribute),
            "fact" => Ok(ObjectKind::Fact),
            "attributedisplayform" => Ok(ObjectKind::DisplayForm),
            _ => Err(TranslateError::Syntax(format!(
                "unknown object category '{}'",
                category
            ))),
        }
    }
}

/// A named, typed, addressable analytical object.
///
/// `uri`, `title` and `identifier` are immutable after population. The
/// datatype is assigned at resolution time, not at creation: entries live
/// in the index with `datatype == None`, and every resolution hands out a
/// clone, so a datatype override from an explicit cast never touches the
/// shared index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identity of the object.
    pub uri: String,
    /// Human-readable title, the name used in queries.
    pub title: String,
    pub kind: ObjectKind,
    pub identifier: String,
    /// Opaque backend reference, passed through unmodified to the
    /// execution layer.
    pub qualifier: String,
    /// Assigned during column resolution; `None` while indexed.
    pub datatype: Option<DatatypeLiteral>,
}

impl CatalogEntry {
    pub fn new(
        uri: impl Into<String>,
        title: impl Into<String>,
        kind: ObjectKind,
        identifier: impl Into<String>,
        qualifier: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            kind,
            identifier: identifier.into(),
            qualifier: qualifier.into(),
            datatype: None,
        }
    }

    pub fn is_metric(&self) -> bool {
        self.kind == ObjectKind::Metric
    }
}

/// The fixed default datatype assigned to resolved metrics.
pub fn default_metric_datatype() -> DatatypeLiteral {
    DatatypeLiteral::new("DECIMAL", 15, 2)
}

/// The fixed default datatype assigned to resolved non-metric columns.
pub fn default_attribute_datatype() -> DatatypeLiteral {
    DatatypeLiteral::new("VARCHAR", 255, 0)
}

/// One item of the external metadata snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub uri: String,
    pub title: String,
    /// Metadata category string, e.g. `metric` or `attributeDisplayForm`.
    pub category: String,
    pub identifier: String,
}

impl ObjectMeta {
    pub fn new(
        uri: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            category: category.into(),
            identifier: identifier.into(),
        }
    }

    /// The object kind this item's category string denotes.
    pub fn kind(&self) -> Result<ObjectKind> {
        ObjectKind::from_category(&self.category)
    }
}

/// An attribute together with its default display form.
///
/// Only the default form is indexed on the query surface; non-default
/// display forms are not reachable through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMeta {
    pub attribute: ObjectMeta,
    pub default_display_form: ObjectMeta,
}

/// The external metadata snapshot the catalog is populated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub metrics: Vec<ObjectMeta>,
    pub attributes: Vec<AttributeMeta>,
    pub facts: Vec<ObjectMeta>,
}
