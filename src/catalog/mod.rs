//! In-memory catalog of analytical objects.
//!
//! The catalog is populated exactly once from an external metadata
//! snapshot and is immutable afterwards, which makes it safe to share
//! across concurrent in-flight statements without locking: population
//! happens before the value (or an `Arc` of it) can be handed out, and
//! every lookup returns an independent clone of the indexed entry.
//!
//! Two namespaces are kept:
//!
//! - **query surface** — objects directly addressable in a SELECT:
//!   metrics, and the default display form of every attribute (indexed
//!   under the attribute's title).
//! - **logical model** — objects addressable by their own identity:
//!   metrics, attributes and facts.
//!
//! An attribute therefore appears twice under the same title: once via
//! its default display form's identity on the query surface, and once
//! under its own identity in the logical model. Titles are expected
//! unique within a namespace; an ambiguous title fails resolution.

pub mod entry;
pub mod filter;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::datatype::{parse_datatype_literal, parse_numeric};
use crate::error::{Result, TranslateError};
use crate::sql::{FilterOperator, ParsedSelect};

pub use entry::{
    default_attribute_datatype, default_metric_datatype, AttributeMeta, CatalogEntry,
    MetadataSnapshot, ObjectKind, ObjectMeta,
};
pub use filter::{BackendPredicate, ResolvedFilter};

/// Workspace segment of an object uri, e.g. `/gdc/md/<workspace>/obj/42`.
static WORKSPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/gdc/md/([^/]+)/").unwrap());

/// The two object namespaces a title can resolve in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    QuerySurface,
    LogicalModel,
}

/// The populated, read-only object catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    query_surface: HashMap<String, CatalogEntry>,
    logical_model: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from the three metadata snapshot collections.
    ///
    /// Every entry's kind comes from the item's own metadata category
    /// string. Metrics land in both namespaces under their own identity.
    /// Each attribute lands on the query surface through its default
    /// display form (keeping the attribute's title) and in the logical
    /// model under its own identity. Facts only exist in the logical
    /// model. An unknown category string aborts population.
    pub fn populate(
        metrics: Vec<ObjectMeta>,
        attributes: Vec<AttributeMeta>,
        facts: Vec<ObjectMeta>,
    ) -> Result<Self> {
        debug!(
            metrics = metrics.len(),
            attributes = attributes.len(),
            facts = facts.len(),
            "populating catalog"
        );

        let mut query_surface = HashMap::new();
        let mut logical_model = HashMap::new();

        for metric in metrics {
            let entry = CatalogEntry::new(
                &metric.uri,
                &metric.title,
                metric.kind()?,
                &metric.identifier,
                &metric.uri,
            );
            query_surface.insert(metric.uri.clone(), entry.clone());
            logical_model.insert(metric.uri, entry);
        }

        for attribute in attributes {
            let form = attribute.default_display_form;
            let owner = attribute.attribute;

            // Only the default display form is reachable; it is indexed
            // under the owning attribute's title.
            let surface = CatalogEntry::new(
                &form.uri,
                &owner.title,
                form.kind()?,
                &form.identifier,
                &form.uri,
            );
            query_surface.insert(form.uri, surface);

            let logical = CatalogEntry::new(
                &owner.uri,
                &owner.title,
                owner.kind()?,
                &owner.identifier,
                &owner.uri,
            );
            logical_model.insert(owner.uri, logical);
        }

        for fact in facts {
            let entry = CatalogEntry::new(
                &fact.uri,
                &fact.title,
                fact.kind()?,
                &fact.identifier,
                &fact.uri,
            );
            logical_model.insert(fact.uri, entry);
        }

        Ok(Self {
            query_surface,
            logical_model,
        })
    }

    /// Build a catalog from a JSON metadata snapshot.
    pub fn from_snapshot_json(text: &str) -> Result<Self> {
        let snapshot: MetadataSnapshot = serde_json::from_str(text)
            .map_err(|e| TranslateError::Syntax(format!("invalid metadata snapshot: {}", e)))?;
        Self::populate(snapshot.metrics, snapshot.attributes, snapshot.facts)
    }

    /// All query-surface entries, in no particular order.
    pub fn query_surface_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.query_surface.values()
    }

    /// All logical-model entries, in no particular order.
    pub fn logical_model_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.logical_model.values()
    }

    /// Resolve a title in the given namespace, case-insensitively.
    ///
    /// Returns a clone of the matching entry. Two or more matches make
    /// the title ambiguous; zero matches mean it doesn't exist.
    pub fn resolve_title(&self, namespace: Namespace, title: &str) -> Result<CatalogEntry> {
        let index = match namespace {
            Namespace::QuerySurface => &self.query_surface,
            Namespace::LogicalModel => &self.logical_model,
        };

        let mut matches = index
            .values()
            .filter(|entry| entry.title.eq_ignore_ascii_case(title));

        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry.clone()),
            (Some(_), Some(_)) => Err(TranslateError::Duplicate(title.to_string())),
            (None, _) => Err(TranslateError::NotFound(title.to_string())),
        }
    }

    /// Resolve the requested columns of a parsed SELECT, in order.
    ///
    /// A `Title::TYPE` cast resolves the title portion and overrides the
    /// clone's datatype with the explicit type; a bare title gets the
    /// default datatype of its kind. The output order matches the input
    /// order, which result-metadata construction relies on.
    pub fn resolve_columns(&self, parsed: &ParsedSelect) -> Result<Vec<CatalogEntry>> {
        let mut resolved = Vec::with_capacity(parsed.columns.len());

        for column in &parsed.columns {
            let entry = match column.split_once("::") {
                Some((title, cast)) => {
                    let datatype = parse_datatype_literal(cast)?;
                    datatype.type_code()?;
                    let mut entry = self.resolve_title(Namespace::QuerySurface, title.trim())?;
                    entry.datatype = Some(datatype);
                    entry
                }
                None => {
                    let mut entry = self.resolve_title(Namespace::QuerySurface, column)?;
                    entry.datatype = Some(if entry.is_metric() {
                        default_metric_datatype()
                    } else {
                        default_attribute_datatype()
                    });
                    entry
                }
            };
            resolved.push(entry);
        }

        debug!(columns = resolved.len(), "resolved select columns");
        Ok(resolved)
    }

    /// Resolve the WHERE predicates of a parsed SELECT, in order.
    ///
    /// Metric filters take a single numeric value and one of the six
    /// comparison operators; every other kind takes Equal or NotEqual
    /// over a value set. Any other combination fails with an unsupported
    /// operator error.
    pub fn resolve_filters(&self, parsed: &ParsedSelect) -> Result<Vec<ResolvedFilter>> {
        let mut resolved = Vec::with_capacity(parsed.filters.len());

        for predicate in &parsed.filters {
            let entry = self.resolve_title(Namespace::QuerySurface, &predicate.column)?;

            let backend = if entry.is_metric() {
                if !predicate.operator.is_comparison() {
                    return Err(TranslateError::UnsupportedOperator(format!(
                        "'{}' can't be applied to metric '{}'",
                        predicate.operator, entry.title
                    )));
                }
                let value = match predicate.values.as_slice() {
                    [value] => parse_numeric(value)?,
                    _ => {
                        return Err(TranslateError::Syntax(format!(
                            "metric filter on '{}' requires exactly one value",
                            entry.title
                        )))
                    }
                };
                BackendPredicate::Comparison {
                    operator: predicate.operator,
                    value,
                }
            } else {
                let included = match predicate.operator {
                    FilterOperator::Equal => true,
                    FilterOperator::NotEqual => false,
                    _ => {
                        return Err(TranslateError::UnsupportedOperator(format!(
                            "'{}' can't be applied to attribute '{}'",
                            predicate.operator, entry.title
                        )))
                    }
                };
                BackendPredicate::ValueSet {
                    included,
                    values: predicate.values.clone(),
                }
            };

            resolved.push(ResolvedFilter {
                entry,
                operator: predicate.operator,
                values: predicate.values.clone(),
                predicate: backend,
            });
        }

        debug!(filters = resolved.len(), "resolved where predicates");
        Ok(resolved)
    }

    /// The workspace identifiers seen across both namespaces.
    ///
    /// Peripheral, used only for driver-level schema metadata.
    pub fn schemas(&self) -> BTreeSet<String> {
        self.query_surface
            .keys()
            .chain(self.logical_model.keys())
            .filter_map(|uri| WORKSPACE_PATTERN.captures(uri))
            .map(|caps| caps[1].to_string())
            .collect()
    }
}
