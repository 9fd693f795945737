//! Command-line application

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{DEFAULT_LOG_FILTER, ENV_LOG};
use crate::model::{Index, Table};
use crate::sql::{SqlBuilder, SqlError};
use crate::utils::jdbc::{CLICKHOUSE_JDBC_SCHEME, JdbcUrl};
use crate::utils::string::starts_with_ignore_ascii_case;

pub struct SqlgenApp;

impl SqlgenApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let builder = config
            .dialect
            .builder(&config.settings)
            .with_context(|| format!("Failed to create {} SQL builder", config.dialect))?;

        let output = Self::execute(builder.as_ref(), &command)?;
        println!("{}", output);
        Ok(())
    }

    /// Render the SQL (or value) a command asks for
    pub fn execute(builder: &dyn SqlBuilder, command: &Commands) -> Result<String> {
        tracing::debug!(dialect = builder.name(), command = ?command, "Executing command");

        let output = match command {
            Commands::CreateTable { table } => {
                let table: Table = read_json(table)?;
                table.validate()?;
                builder.create_table(&table)
            }
            Commands::CreateIndex { index } => {
                let index: Index = read_json(index)?;
                builder.create_index(&index)?
            }
            Commands::SwapTable { table, new_name } => {
                let table: Table = read_json(table)?;
                table.validate()?;
                builder.swap_table(&table, new_name)
            }
            Commands::DropTable { name, cascade } => {
                if *cascade {
                    builder.drop_table_if_exists_cascade(name)
                } else {
                    builder.drop_table_if_exists(name)
                }
            }
            Commands::TableExists { name } => builder.table_exists(name),
            Commands::CountRows { table } => {
                let table: Table = read_json(table)?;
                builder.count_rows(&table)
            }
            Commands::InsertSelect { table, source } => {
                let table: Table = read_json(table)?;
                table.validate()?;
                builder.insert_into_select_from(&table, source)
            }
            Commands::Analyze { name } => builder.analyze_table(name)?,
            Commands::Vacuum { name } => builder.vacuum_table(name)?,
            Commands::AggrDecimal {
                expression,
                precision,
                scale,
            } => builder.aggr_decimal(expression, *precision, *scale),
            Commands::RenderTimestamp { value } => builder
                .render_timestamp(Some(value.as_str()))?
                .unwrap_or_default(),
            Commands::Quote { identifier } => builder.quote(identifier),
            Commands::DatabaseName { url } => {
                let url = if starts_with_ignore_ascii_case(url.trim(), CLICKHOUSE_JDBC_SCHEME) {
                    JdbcUrl::clickhouse(url)?
                } else {
                    JdbcUrl::postgres(url)?
                };
                url.database_name().unwrap_or_default().to_string()
            }
            Commands::CreateCatalog {
                url,
                username,
                password,
            } => builder
                .as_catalog_federation()
                .ok_or_else(|| SqlError::unsupported(builder.name(), "create_catalog"))?
                .create_catalog(url, username, password)?,
            Commands::DropCatalog => builder
                .as_catalog_federation()
                .ok_or_else(|| SqlError::unsupported(builder.name(), "drop_catalog"))?
                .drop_catalog_if_exists(),
            Commands::CreateNamedCollection {
                url,
                username,
                password,
            } => builder
                .as_named_collection_federation()
                .ok_or_else(|| SqlError::unsupported(builder.name(), "create_named_collection"))?
                .create_postgres_named_collection(url, username, password)?,
            Commands::DropNamedCollection => {
                let federation = builder.as_named_collection_federation().ok_or_else(|| {
                    SqlError::unsupported(builder.name(), "drop_named_collection")
                })?;
                federation.drop_named_collection_if_exists(federation.named_collection())
            }
        };

        Ok(output)
    }

    fn init_logging() {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

/// Read a JSON descriptor from disk
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse descriptor: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{ClickHouseSqlBuilder, DorisSqlBuilder, PostgresSqlBuilder};
    use std::io::Write;
    use std::path::PathBuf;

    const TABLE_JSON: &str = r#"{
        "name": "immunization",
        "columns": [
            { "name": "id", "data_type": "big_int", "nullable": "not_null" },
            { "name": "data", "data_type": { "character": 11 }, "nullable": "not_null" },
            { "name": "value", "data_type": "double" }
        ],
        "primary_key": ["id"]
    }"#;

    fn write_json(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn doris() -> DorisSqlBuilder {
        DorisSqlBuilder::analytics("pg_dhis", "postgresql.jar").unwrap()
    }

    #[test]
    fn test_execute_create_table_from_json() {
        let file = write_json(TABLE_JSON);
        let command = Commands::CreateTable {
            table: file.path().to_path_buf(),
        };
        let sql = SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap();
        assert_eq!(
            sql,
            "create table \"immunization\" (\"id\" bigint not null, \"data\" char(11) not null, \
             \"value\" double precision null, primary key (\"id\"));"
        );
    }

    #[test]
    fn test_execute_create_table_invalid_descriptor() {
        let file = write_json(
            r#"{ "name": "t", "columns": [{ "name": "a", "data_type": "text" }], "primary_key": ["b"] }"#,
        );
        let command = Commands::CreateTable {
            table: file.path().to_path_buf(),
        };
        let err = SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap_err();
        assert!(err.downcast_ref::<SqlError>().is_some());
    }

    #[test]
    fn test_execute_missing_descriptor() {
        let command = Commands::CountRows {
            table: PathBuf::from("/nonexistent/table.json"),
        };
        let err = SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap_err();
        assert!(err.to_string().contains("Failed to read descriptor"));
    }

    #[test]
    fn test_execute_create_index() {
        let file = write_json(
            r#"{ "name": "in_value", "table_name": "immunization", "columns": ["value"], "index_type": "gin" }"#,
        );
        let command = Commands::CreateIndex {
            index: file.path().to_path_buf(),
        };
        assert_eq!(
            SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap(),
            "create index \"in_value\" on \"immunization\" using gin(\"value\");"
        );
    }

    #[test]
    fn test_execute_drop_table() {
        let command = Commands::DropTable {
            name: "vaccination".to_string(),
            cascade: true,
        };
        assert_eq!(
            SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap(),
            "drop table if exists \"vaccination\" cascade;"
        );
    }

    #[test]
    fn test_execute_unsupported_surfaces_error() {
        let command = Commands::Vacuum {
            name: "immunization".to_string(),
        };
        let err = SqlgenApp::execute(&doris(), &command).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation 'vacuum_table' is not supported by analytics-doris"
        );
    }

    #[test]
    fn test_execute_aggr_decimal() {
        let command = Commands::AggrDecimal {
            expression: "AVG(value)".to_string(),
            precision: 10,
            scale: 2,
        };
        assert_eq!(
            SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap(),
            "AVG((value)::numeric(10,2))"
        );
    }

    #[test]
    fn test_execute_render_timestamp() {
        let command = Commands::RenderTimestamp {
            value: "2023-10-20T15:30:45.400".to_string(),
        };
        assert_eq!(
            SqlgenApp::execute(&doris(), &command).unwrap(),
            "2023-10-20 15:30:45.4"
        );
    }

    #[test]
    fn test_execute_database_name() {
        let command = Commands::DatabaseName {
            url: "jdbc:clickhouse://localhost:8123/analytics?ssl=true".to_string(),
        };
        assert_eq!(
            SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap(),
            "analytics"
        );

        let command = Commands::DatabaseName {
            url: "jdbc:postgresql://localhost:5432/dhis2".to_string(),
        };
        assert_eq!(
            SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap(),
            "dhis2"
        );
    }

    #[test]
    fn test_execute_create_catalog_requires_doris() {
        let command = Commands::CreateCatalog {
            url: "jdbc:postgresql://db/dhis2".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let err = SqlgenApp::execute(&PostgresSqlBuilder, &command).unwrap_err();
        assert!(err.to_string().contains("create_catalog"));
        assert!(SqlgenApp::execute(&doris(), &command).is_ok());
    }

    #[test]
    fn test_execute_drop_named_collection() {
        let clickhouse = ClickHouseSqlBuilder::new("jdbc:clickhouse://localhost:8123/dw").unwrap();
        assert_eq!(
            SqlgenApp::execute(&clickhouse, &Commands::DropNamedCollection).unwrap(),
            "drop named collection if exists \"pg_dhis\";"
        );
        assert!(SqlgenApp::execute(&doris(), &Commands::DropNamedCollection).is_err());
    }
}
