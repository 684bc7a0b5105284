//! influx-explore CLI
//!
//! Prints InfluxQL explore queries for a measurement selection taken from
//! the config file, environment and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use influx_explore::config::{generate_default_config, LogFormat};
use influx_explore::{Config, ExploreQueryBuilder, LoggingConfig, QueryKind, Tag};

#[derive(Parser)]
#[command(name = "influx-explore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build InfluxQL metadata queries for a measurement selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database used by retention policy queries
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Measurement name or /regex/
    #[arg(short, long, global = true)]
    pub measurement: Option<String>,

    /// Retention policy ("default" for none)
    #[arg(short, long, global = true)]
    pub policy: Option<String>,

    /// Tag filters in key=value format; replace the configured tags
    #[arg(short = 'T', long = "tag", global = true)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// SHOW TAG KEYS
    TagKeys,

    /// SHOW TAG VALUES for a tag key
    TagValues {
        /// Tag key whose values are listed
        key: String,
    },

    /// SHOW MEASUREMENTS
    Measurements {
        /// Regex body restricting measurement names
        #[arg(long)]
        filter: Option<String>,
    },

    /// SHOW FIELD KEYS
    Fields,

    /// SHOW RETENTION POLICIES
    RetentionPolicies,

    /// Build a query by kind name (e.g. TAG_KEYS, "RETENTION POLICIES")
    Build {
        /// Query kind
        kind: String,
        /// Tag key, required for TAG_VALUES
        #[arg(short, long)]
        key: Option<String>,
        /// Measurement filter, used by MEASUREMENTS
        #[arg(long)]
        filter: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Query text only
    Text,
    /// {"kind": ..., "query": ...}
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (kind, query) = match &cli.command {
        Commands::Config { output } => return write_default_config(output.as_deref()),
        Commands::TagKeys => (QueryKind::TagKeys, load_builder(&cli)?.tag_keys()),
        Commands::TagValues { key } => (QueryKind::TagValues, load_builder(&cli)?.tag_values(key)?),
        Commands::Measurements { filter } => (
            QueryKind::Measurements,
            load_builder(&cli)?.measurements(filter.as_deref()),
        ),
        Commands::Fields => (QueryKind::Fields, load_builder(&cli)?.field_keys()),
        Commands::RetentionPolicies => (
            QueryKind::RetentionPolicies,
            load_builder(&cli)?.retention_policies(),
        ),
        Commands::Build { kind, key, filter } => {
            let kind: QueryKind = kind.parse()?;
            let query = load_builder(&cli)?.build_explore_query(
                kind,
                key.as_deref(),
                filter.as_deref(),
            )?;
            (kind, query)
        }
    };

    match cli.format {
        OutputFormat::Text => println!("{}", query),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "kind": kind, "query": query })
        ),
    }

    Ok(())
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?,
        None => print!("{}", content),
    }
    Ok(())
}

/// Resolve the config, install logging and build the query builder.
///
/// Discovery failures are only logged once the subscriber is installed.
fn load_builder(cli: &Cli) -> anyhow::Result<ExploreQueryBuilder> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)?;
            init_logging(&config.logging);
            config
        }
        None => {
            let discovery = Config::discover();
            init_logging(&discovery.config.logging);
            discovery.report();
            discovery.config
        }
    };
    apply_cli_overrides(&mut config, cli)?;

    Ok(match config.database {
        Some(database) => ExploreQueryBuilder::with_database(config.target, database),
        None => ExploreQueryBuilder::new(config.target),
    })
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(database) = &cli.database {
        config.database = Some(database.clone());
    }
    if let Some(measurement) = &cli.measurement {
        config.target.measurement = measurement.clone();
    }
    if let Some(policy) = &cli.policy {
        config.target.policy = Some(policy.clone());
    }
    if !cli.tags.is_empty() {
        config.target.tags = cli
            .tags
            .iter()
            .map(|t| t.parse::<Tag>())
            .collect::<Result<Vec<_>, _>>()?;
    }

    tracing::debug!(
        measurement = %config.target.measurement,
        tags = config.target.tags.len(),
        database = ?config.database,
        "Resolved explore target"
    );
    Ok(())
}

// Logs go to stderr so stdout only carries the query.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("influx_explore={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
