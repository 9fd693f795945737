use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    APP_NAME_LOWER, DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE, ENV_CATALOG, ENV_CONFIG,
    ENV_CONNECTION_URL, ENV_DIALECT, ENV_DRIVER_FILENAME, ENV_NAMED_COLLECTION,
};
use crate::sql::Dialect;

#[derive(Parser)]
#[command(name = APP_NAME_LOWER)]
#[command(
    version,
    about = "Generate analytics SQL for Postgres, ClickHouse and Doris",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Target dialect (postgres, clickhouse, doris, analytics-doris)
    #[arg(long, short = 'd', global = true, env = ENV_DIALECT, value_parser = parse_dialect)]
    pub dialect: Option<Dialect>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Analytics database connection URL (required for clickhouse)
    #[arg(long, global = true, env = ENV_CONNECTION_URL)]
    pub connection_url: Option<String>,

    /// JDBC catalog mounting the source database (doris)
    #[arg(long, global = true, env = ENV_CATALOG)]
    pub catalog: Option<String>,

    /// JDBC driver jar loaded by the catalog (doris)
    #[arg(long, global = true, env = ENV_DRIVER_FILENAME)]
    pub driver_filename: Option<String>,

    /// Named collection holding the source connection (clickhouse)
    #[arg(long, global = true, env = ENV_NAMED_COLLECTION)]
    pub named_collection: Option<String>,
}

/// Parse dialect from CLI/env string
fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse::<Dialect>().map_err(|_| {
        format!(
            "Invalid dialect '{}'. Valid options: postgres, clickhouse, doris, analytics-doris",
            s
        )
    })
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create a table described by a JSON file
    CreateTable {
        /// Table descriptor (JSON)
        table: PathBuf,
    },
    /// Create an index described by a JSON file
    CreateIndex {
        /// Index descriptor (JSON)
        index: PathBuf,
    },
    /// Replace a table with a freshly populated one
    SwapTable {
        /// Table descriptor (JSON) of the new table
        table: PathBuf,
        /// Name of the table being replaced
        new_name: String,
    },
    /// Drop a table if it exists
    DropTable {
        name: String,
        /// Also drop dependent objects
        #[arg(long)]
        cascade: bool,
    },
    /// Check whether a base table exists
    TableExists { name: String },
    /// Count the rows of a table
    CountRows {
        /// Table descriptor (JSON)
        table: PathBuf,
    },
    /// Copy rows from a source relation into a table
    InsertSelect {
        /// Table descriptor (JSON)
        table: PathBuf,
        /// Source relation, used verbatim
        source: String,
    },
    /// Collect table statistics
    Analyze { name: String },
    /// Reclaim table storage
    Vacuum { name: String },
    /// Cast the operand of an aggregate call to a fixed-precision decimal
    AggrDecimal {
        expression: String,
        #[arg(long, default_value_t = DEFAULT_DECIMAL_PRECISION)]
        precision: u32,
        #[arg(long, default_value_t = DEFAULT_DECIMAL_SCALE)]
        scale: u32,
    },
    /// Render an ISO local date-time as a literal for the dialect
    RenderTimestamp { value: String },
    /// Quote an identifier
    Quote { identifier: String },
    /// Print the database name of a JDBC URL
    DatabaseName { url: String },
    /// Mount a Postgres database as a JDBC catalog (doris)
    CreateCatalog {
        /// `jdbc:postgresql://` URL of the source database
        url: String,
        username: String,
        password: String,
    },
    /// Drop the JDBC catalog (doris)
    DropCatalog,
    /// Create a named collection for a Postgres database (clickhouse)
    CreateNamedCollection {
        /// `jdbc:postgresql://` URL of the source database
        url: String,
        username: String,
        password: String,
    },
    /// Drop the named collection (clickhouse)
    DropNamedCollection,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dialect: Option<Dialect>,
    pub config: Option<PathBuf>,
    pub connection_url: Option<String>,
    pub catalog: Option<String>,
    pub driver_filename: Option<String>,
    pub named_collection: Option<String>,
}

/// Parse CLI arguments into configuration and command
pub fn parse() -> (CliConfig, Commands) {
    split(Cli::parse())
}

fn split(cli: Cli) -> (CliConfig, Commands) {
    let config = CliConfig {
        dialect: cli.dialect,
        config: cli.config,
        connection_url: cli.connection_url,
        catalog: cli.catalog,
        driver_filename: cli.driver_filename,
        named_collection: cli.named_collection,
    };
    (config, cli.command)
}
