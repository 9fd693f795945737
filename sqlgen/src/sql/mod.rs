//! SQL generation layer for multi-database support
//!
//! This module turns schema descriptors and expression fragments into SQL text
//! for the engines analytics tables are populated in (PostgreSQL, ClickHouse,
//! Apache Doris). Nothing here talks to a database; callers execute the output.

pub mod base;
mod builder;
mod clickhouse_builder;
mod doris_builder;
mod error;
mod federation;
mod postgres_builder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use builder::{ALIAS_AX, SqlBuilder};
pub use clickhouse_builder::ClickHouseSqlBuilder;
pub use doris_builder::DorisSqlBuilder;
pub use error::SqlError;
pub use federation::{CatalogFederation, DEFAULT_POSTGRES_PORT, NamedCollectionFederation};
pub use postgres_builder::PostgresSqlBuilder;

use crate::core::constants::{DEFAULT_CATALOG, DEFAULT_DRIVER_FILENAME, DEFAULT_NAMED_COLLECTION};

/// Target SQL dialect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    #[default]
    #[serde(alias = "postgresql")]
    Postgres,
    Clickhouse,
    Doris,
    /// Doris with trimmed fractional seconds in rendered timestamps
    AnalyticsDoris,
}

impl Dialect {
    /// All dialects, in display order
    pub const ALL: [Dialect; 4] = [
        Dialect::Postgres,
        Dialect::Clickhouse,
        Dialect::Doris,
        Dialect::AnalyticsDoris,
    ];

    /// Get the dialect name
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Clickhouse => "clickhouse",
            Dialect::Doris => "doris",
            Dialect::AnalyticsDoris => "analytics-doris",
        }
    }

    /// Whether the dialect mounts the source database as a JDBC catalog
    pub fn is_doris(&self) -> bool {
        matches!(self, Dialect::Doris | Dialect::AnalyticsDoris)
    }

    /// Create the SQL builder for this dialect
    pub fn builder(&self, settings: &DialectSettings) -> Result<Box<dyn SqlBuilder>, SqlError> {
        tracing::debug!(dialect = self.name(), "Creating SQL builder");

        let builder: Box<dyn SqlBuilder> = match self {
            Dialect::Postgres => Box::new(PostgresSqlBuilder),
            Dialect::Clickhouse => {
                let url = settings.connection_url.as_deref().ok_or_else(|| {
                    SqlError::invalid_url("clickhouse requires a connection URL")
                })?;
                Box::new(ClickHouseSqlBuilder::with_named_collection(
                    url,
                    &settings.named_collection,
                )?)
            }
            Dialect::Doris => Box::new(DorisSqlBuilder::new(
                &settings.catalog,
                &settings.driver_filename,
            )?),
            Dialect::AnalyticsDoris => Box::new(DorisSqlBuilder::analytics(
                &settings.catalog,
                &settings.driver_filename,
            )?),
        };
        Ok(builder)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "clickhouse" => Ok(Dialect::Clickhouse),
            "doris" => Ok(Dialect::Doris),
            "analytics-doris" => Ok(Dialect::AnalyticsDoris),
            _ => Err(format!(
                "unknown dialect: {} (expected postgres, clickhouse, doris or analytics-doris)",
                s
            )),
        }
    }
}

/// Construction parameters for dialects that need them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectSettings {
    /// `jdbc:clickhouse://` URL of the analytics database (ClickHouse only)
    pub connection_url: Option<String>,
    /// JDBC catalog mounting the source database (Doris only)
    pub catalog: String,
    /// JDBC driver jar loaded by the catalog (Doris only)
    pub driver_filename: String,
    /// Named collection used by the `postgresql()` table function (ClickHouse only)
    pub named_collection: String,
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            connection_url: None,
            catalog: DEFAULT_CATALOG.to_string(),
            driver_filename: DEFAULT_DRIVER_FILENAME.to_string(),
            named_collection: DEFAULT_NAMED_COLLECTION.to_string(),
        }
    }
}
