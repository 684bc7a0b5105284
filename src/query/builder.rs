//! Explore query builder
//!
//! Turns a [`Target`] into InfluxQL metadata statements. Each statement is
//! assembled from optional fragments in a fixed order:
//!
//! ```text
//! <prefix> [FROM ...] [WITH ... | on "<db>"] [WHERE ...] [LIMIT 100]
//! ```
//!
//! # Example
//!
//! ```rust
//! use influx_explore::query::{ExploreQueryBuilder, QueryKind, Target};
//!
//! let target = Target::new("cpu")
//!     .policy("one_week")
//!     .tag("app", "email")
//!     .tag("host", "server1");
//! let builder = ExploreQueryBuilder::new(target);
//!
//! let query = builder
//!     .build_explore_query(QueryKind::TagValues, Some("app"), None)
//!     .unwrap();
//! assert_eq!(
//!     query,
//!     r#"SHOW TAG VALUES FROM "one_week"."cpu" WITH KEY = "app" WHERE "host" = 'server1'"#
//! );
//! ```

use crate::query::ast::{QueryKind, Target};
use crate::query::clause::{from_clause, where_clause};
use crate::query::error::{QueryError, QueryResult};

/// Row limit appended to every measurements listing
pub const MEASUREMENTS_LIMIT: usize = 100;

/// Builds explore queries for one immutable target
#[derive(Debug, Clone)]
pub struct ExploreQueryBuilder {
    target: Target,
    database: Option<String>,
}

impl ExploreQueryBuilder {
    /// Create a builder without a database name
    pub fn new(target: Target) -> Self {
        Self {
            target,
            database: None,
        }
    }

    /// Create a builder bound to a database, used by retention policy queries
    pub fn with_database(target: Target, database: impl Into<String>) -> Self {
        Self {
            target,
            database: Some(database.into()),
        }
    }

    /// The target this builder renders
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The database name, if any
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Build an explore query of the given kind.
    ///
    /// # Arguments
    /// * `kind` - Which metadata to list
    /// * `tag_key` - Key whose values are listed; required for
    ///   [`QueryKind::TagValues`], ignored otherwise
    /// * `measurement_filter` - Regex body restricting measurement names;
    ///   only used by [`QueryKind::Measurements`], and only when non-empty
    ///
    /// # Errors
    /// Returns [`QueryError::MissingTagKey`] when a TAG_VALUES query is
    /// requested without a non-empty `tag_key`.
    pub fn build_explore_query(
        &self,
        kind: QueryKind,
        tag_key: Option<&str>,
        measurement_filter: Option<&str>,
    ) -> QueryResult<String> {
        let tag_key = tag_key.filter(|k| !k.is_empty());
        if kind == QueryKind::TagValues && tag_key.is_none() {
            tracing::warn!(
                measurement = %self.target.measurement,
                "TAG_VALUES query requested without a tag key"
            );
            return Err(QueryError::MissingTagKey);
        }

        Ok(self.assemble(kind, tag_key.unwrap_or_default(), measurement_filter))
    }

    /// `SHOW TAG KEYS` for the target
    pub fn tag_keys(&self) -> String {
        self.assemble(QueryKind::TagKeys, "", None)
    }

    /// `SHOW TAG VALUES` for `key`, excluding the tag filter on `key` itself
    pub fn tag_values(&self, key: &str) -> QueryResult<String> {
        self.build_explore_query(QueryKind::TagValues, Some(key), None)
    }

    /// `SHOW MEASUREMENTS`, optionally restricted by a name regex
    pub fn measurements(&self, filter: Option<&str>) -> String {
        self.assemble(QueryKind::Measurements, "", filter)
    }

    /// `SHOW FIELD KEYS` for the target measurement
    pub fn field_keys(&self) -> String {
        self.assemble(QueryKind::Fields, "", None)
    }

    /// `SHOW RETENTION POLICIES` on the builder's database
    pub fn retention_policies(&self) -> String {
        self.assemble(QueryKind::RetentionPolicies, "", None)
    }

    /// Join the fragments for `kind`. `tag_key` must be non-empty for
    /// TAG_VALUES; it is ignored by every other kind.
    fn assemble(&self, kind: QueryKind, tag_key: &str, measurement_filter: Option<&str>) -> String {
        let mut parts: Vec<String> = vec![kind.prefix().to_string()];

        match kind {
            QueryKind::TagKeys => {
                parts.extend(from_clause(&self.target));
                parts.extend(where_clause(&self.target.tags, None));
            }
            QueryKind::TagValues => {
                parts.extend(from_clause(&self.target));
                parts.push(format!("WITH KEY = \"{}\"", tag_key));
                parts.extend(where_clause(&self.target.tags, Some(tag_key)));
            }
            QueryKind::Measurements => {
                if let Some(filter) = measurement_filter.filter(|f| !f.is_empty()) {
                    parts.push(format!("WITH MEASUREMENT =~ /{}/", filter));
                }
                parts.extend(where_clause(&self.target.tags, None));
                parts.push(format!("LIMIT {}", MEASUREMENTS_LIMIT));
            }
            QueryKind::Fields => {
                parts.extend(from_clause(&self.target));
            }
            QueryKind::RetentionPolicies => {
                if let Some(database) = &self.database {
                    parts.push(format!("on \"{}\"", database));
                }
            }
        }

        let query = parts.join(" ");
        tracing::debug!(kind = %kind, query = %query, "Built explore query");
        query
    }
}
