//! Explore Query Builder
//!
//! Builds InfluxQL metadata ("explore") statements from a measurement
//! selection:
//!
//! - **AST**: Target, tag filter and query kind types
//! - **Clause**: Quoting helpers and FROM / WHERE clause builders
//! - **Builder**: Per-kind statement assembly
//!
//! # Statements
//!
//! ```text
//! SHOW TAG KEYS [FROM <from>] [WHERE <tags>]
//! SHOW TAG VALUES [FROM <from>] WITH KEY = "<key>" [WHERE <other tags>]
//! SHOW MEASUREMENTS [WITH MEASUREMENT =~ /<filter>/] [WHERE <tags>] LIMIT 100
//! SHOW FIELD KEYS [FROM <from>]
//! SHOW RETENTION POLICIES [on "<database>"]
//! ```
//!
//! # Examples
//!
//! ```rust
//! use influx_explore::query::{ExploreQueryBuilder, Target};
//!
//! let builder = ExploreQueryBuilder::new(Target::new("").tag("host", "se1"));
//! assert_eq!(builder.tag_keys(), r#"SHOW TAG KEYS WHERE "host" = 'se1'"#);
//!
//! let builder = ExploreQueryBuilder::with_database(Target::new("cpu"), "site");
//! assert_eq!(builder.retention_policies(), r#"SHOW RETENTION POLICIES on "site""#);
//! ```

mod ast;
mod builder;
mod clause;
mod error;

pub use ast::{QueryKind, Tag, TagOperator, Target, DEFAULT_POLICY};
pub use builder::{ExploreQueryBuilder, MEASUREMENTS_LIMIT};
pub use clause::{
    from_clause, is_regex_literal, quote_identifier, quote_literal, tag_condition, where_clause,
};
pub use error::{QueryError, QueryResult};
