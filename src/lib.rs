//! # influx-explore
//!
//! Builds InfluxQL metadata queries for exploring a time-series database:
//! listing tag keys, tag values, measurements, field keys and retention
//! policies for a measurement selection.
//!
//! The builder only produces query text. Sending it to a database and
//! reading the response is left to the caller.
//!
//! ## Modules
//!
//! - [`query`]: Target model, clause builders and the explore query builder
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use influx_explore::{ExploreQueryBuilder, QueryKind, Target};
//!
//! let target = Target::new("cpu").tag("host", "/server.*/");
//! let builder = ExploreQueryBuilder::new(target);
//!
//! let query = builder
//!     .build_explore_query(QueryKind::TagValues, Some("app"), None)
//!     .unwrap();
//! assert_eq!(query, r#"SHOW TAG VALUES FROM "cpu" WITH KEY = "app" WHERE "host" =~ /server.*/"#);
//! ```

pub mod config;
pub mod query;

// Re-export top-level types for convenience
pub use query::{
    ExploreQueryBuilder, QueryError, QueryKind, QueryResult, Tag, TagOperator, Target,
};

pub use config::{Config, ConfigDiscovery, ConfigError, LogFormat, LoggingConfig};
