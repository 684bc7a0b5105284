//! Explore query target model
//!
//! Describes *what* an explore query is about: a measurement (plain name or
//! `/regex/`), an optional retention policy and an ordered list of tag
//! filters. The kinds of metadata query that can be built from a target are
//! enumerated by [`QueryKind`].
//!
//! # Example
//!
//! ```rust
//! use influx_explore::query::Target;
//!
//! let target = Target::new("cpu")
//!     .policy("one_week")
//!     .tag("host", "server1")
//!     .tag("region", "/eu-.*/");
//!
//! assert_eq!(target.tags.len(), 2);
//! assert!(target.tags[1].is_regex());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query::clause::is_regex_literal;
use crate::query::error::{QueryError, QueryResult};

/// Retention policy name that means "no policy qualification"
pub const DEFAULT_POLICY: &str = "default";

/// A single tag filter condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key
    pub key: String,
    /// Tag value, either a plain string or a `/regex/` literal
    pub value: String,
}

impl Tag {
    /// Create a new tag filter
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Whether the value is a regex literal
    pub fn is_regex(&self) -> bool {
        is_regex_literal(&self.value)
    }

    /// Comparison operator implied by the value
    pub fn operator(&self) -> TagOperator {
        if self.is_regex() {
            TagOperator::RegexMatch
        } else {
            TagOperator::Eq
        }
    }
}

impl FromStr for Tag {
    type Err = QueryError;

    /// Parse a `key=value` pair. The value may itself contain `=`.
    fn from_str(s: &str) -> QueryResult<Self> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| QueryError::InvalidTag(format!("expected key=value, got '{}'", s)))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(QueryError::InvalidTag(format!("empty tag key in '{}'", s)));
        }

        Ok(Tag::new(key, value.trim()))
    }
}

/// Operators used in tag conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOperator {
    /// Equal to a quoted literal
    Eq,
    /// Matches a regex literal
    RegexMatch,
}

impl fmt::Display for TagOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::RegexMatch => write!(f, "=~"),
        }
    }
}

/// The measurement selection an explore query is built from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Measurement name; empty means "any measurement"
    #[serde(default)]
    pub measurement: String,
    /// Retention policy; `None` or `"default"` leaves the measurement unqualified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Tag filters, in the order they are rendered
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Target {
    /// Create a target for a measurement
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            policy: None,
            tags: Vec::new(),
        }
    }

    /// Set the retention policy
    pub fn policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Append a tag filter
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    /// Append several tag filters
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Retention policy that should qualify the measurement, if any
    pub fn effective_policy(&self) -> Option<&str> {
        self.policy
            .as_deref()
            .filter(|p| !p.is_empty() && *p != DEFAULT_POLICY)
    }
}

/// Kinds of metadata ("explore") queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryKind {
    /// `SHOW TAG KEYS`
    TagKeys,
    /// `SHOW TAG VALUES ... WITH KEY = "<key>"`
    TagValues,
    /// `SHOW MEASUREMENTS`
    Measurements,
    /// `SHOW FIELD KEYS`
    Fields,
    /// `SHOW RETENTION POLICIES`
    RetentionPolicies,
}

impl QueryKind {
    /// All kinds, in declaration order
    pub const ALL: [QueryKind; 5] = [
        Self::TagKeys,
        Self::TagValues,
        Self::Measurements,
        Self::Fields,
        Self::RetentionPolicies,
    ];

    /// Statement keyword prefix for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::TagKeys => "SHOW TAG KEYS",
            Self::TagValues => "SHOW TAG VALUES",
            Self::Measurements => "SHOW MEASUREMENTS",
            Self::Fields => "SHOW FIELD KEYS",
            Self::RetentionPolicies => "SHOW RETENTION POLICIES",
        }
    }

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TagKeys => "TAG_KEYS",
            Self::TagValues => "TAG_VALUES",
            Self::Measurements => "MEASUREMENTS",
            Self::Fields => "FIELDS",
            Self::RetentionPolicies => "RETENTION_POLICIES",
        }
    }
}

impl FromStr for QueryKind {
    type Err = QueryError;

    /// Parse a kind name. Case-insensitive; spaces and dashes are accepted
    /// in place of underscores (`RETENTION POLICIES`, `tag-values`).
    fn from_str(s: &str) -> QueryResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");

        match normalized.as_str() {
            "TAG_KEYS" => Ok(Self::TagKeys),
            "TAG_VALUES" => Ok(Self::TagValues),
            "MEASUREMENTS" => Ok(Self::Measurements),
            "FIELDS" | "FIELD_KEYS" => Ok(Self::Fields),
            "RETENTION_POLICIES" => Ok(Self::RetentionPolicies),
            _ => Err(QueryError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_builder() {
        let target = Target::new("cpu")
            .policy("one_week")
            .tag("app", "email")
            .tag("host", "server1");

        assert_eq!(target.measurement, "cpu");
        assert_eq!(target.policy.as_deref(), Some("one_week"));
        assert_eq!(target.tags.len(), 2);
        assert_eq!(target.tags[0], Tag::new("app", "email"));
        assert_eq!(target.tags[1].key, "host");
    }

    #[test]
    fn test_effective_policy() {
        assert_eq!(Target::new("cpu").effective_policy(), None);
        assert_eq!(Target::new("cpu").policy("default").effective_policy(), None);
        assert_eq!(Target::new("cpu").policy("").effective_policy(), None);
        assert_eq!(
            Target::new("cpu").policy("one_week").effective_policy(),
            Some("one_week")
        );
    }

    #[test]
    fn test_tag_operator() {
        assert_eq!(Tag::new("host", "server1").operator(), TagOperator::Eq);
        assert_eq!(Tag::new("host", "/server.*/").operator(), TagOperator::RegexMatch);
        assert_eq!(TagOperator::Eq.to_string(), "=");
        assert_eq!(TagOperator::RegexMatch.to_string(), "=~");
    }

    #[test]
    fn test_tag_from_str() {
        let tag: Tag = "host=server1".parse().unwrap();
        assert_eq!(tag, Tag::new("host", "server1"));

        // Only the first '=' separates key and value
        let tag: Tag = "expr=a=b".parse().unwrap();
        assert_eq!(tag.value, "a=b");

        assert!(matches!("host".parse::<Tag>(), Err(QueryError::InvalidTag(_))));
        assert!(matches!("=server1".parse::<Tag>(), Err(QueryError::InvalidTag(_))));
    }

    #[test]
    fn test_query_kind_from_str() {
        assert_eq!("TAG_KEYS".parse::<QueryKind>().unwrap(), QueryKind::TagKeys);
        assert_eq!("tag-values".parse::<QueryKind>().unwrap(), QueryKind::TagValues);
        assert_eq!("measurements".parse::<QueryKind>().unwrap(), QueryKind::Measurements);
        assert_eq!("FIELDS".parse::<QueryKind>().unwrap(), QueryKind::Fields);
        assert_eq!(
            "RETENTION POLICIES".parse::<QueryKind>().unwrap(),
            QueryKind::RetentionPolicies
        );

        let err = "SERIES".parse::<QueryKind>().unwrap_err();
        assert_eq!(err, QueryError::UnknownKind("SERIES".to_string()));
    }

    #[test]
    fn test_query_kind_display_round_trips() {
        for kind in QueryKind::ALL {
            assert_eq!(kind.to_string().parse::<QueryKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_target_deserialize_defaults() {
        let target: Target = serde_json::from_str(r#"{"measurement": "cpu"}"#).unwrap();
        assert_eq!(target, Target::new("cpu"));

        let target: Target = serde_json::from_str(
            r#"{"measurement": "", "policy": "default", "tags": [{"key": "host", "value": "se1"}]}"#,
        )
        .unwrap();
        assert_eq!(target.policy.as_deref(), Some("default"));
        assert_eq!(target.tags, vec![Tag::new("host", "se1")]);
    }

    #[test]
    fn test_query_kind_serde_names() {
        let json = serde_json::to_string(&QueryKind::RetentionPolicies).unwrap();
        assert_eq!(json, "\"RETENTION_POLICIES\"");
        let kind: QueryKind = serde_json::from_str("\"TAG_VALUES\"").unwrap();
        assert_eq!(kind, QueryKind::TagValues);
    }
}
