//! Apache Doris SQL builder implementation
//!
//! Covers both the plain Doris dialect and the analytics variant, which only
//! differs in how timestamps are rendered.

use super::base;
use super::federation::CatalogFederation;
use super::{SqlBuilder, SqlError};
use crate::core::constants::{DORIS_BUCKETS, DORIS_REPLICATION_NUM, POSTGRES_SCHEMA};
use crate::model::{Column, DataType, Table};
use crate::utils::jdbc::JdbcUrl;
use crate::utils::time::render_trimmed_timestamp;

const QUOTE: char = '`';

/// JDBC driver class of the Postgres catalog
const POSTGRES_DRIVER_CLASS: &str = "org.postgresql.Driver";

/// Apache Doris SQL builder
///
/// Holds the name of the JDBC catalog which mounts the source Postgres database
/// and the driver jar Doris loads for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DorisSqlBuilder {
    catalog: String,
    driver_filename: String,
    trim_timestamps: bool,
}

impl DorisSqlBuilder {
    /// Create a plain Doris builder
    pub fn new(catalog: &str, driver_filename: &str) -> Result<Self, SqlError> {
        Self::build(catalog, driver_filename, false)
    }

    /// Create the analytics variant, which trims fractional seconds in
    /// [`SqlBuilder::render_timestamp`]
    pub fn analytics(catalog: &str, driver_filename: &str) -> Result<Self, SqlError> {
        Self::build(catalog, driver_filename, true)
    }

    fn build(catalog: &str, driver_filename: &str, trim_timestamps: bool) -> Result<Self, SqlError> {
        let catalog = require_non_blank(catalog, "catalog")?;
        let driver_filename = require_non_blank(driver_filename, "driver filename")?;

        tracing::debug!(catalog, driver_filename, trim_timestamps, "Created Doris SQL builder");

        Ok(Self {
            catalog: catalog.to_string(),
            driver_filename: driver_filename.to_string(),
            trim_timestamps,
        })
    }

    pub fn driver_filename(&self) -> &str {
        &self.driver_filename
    }

    pub fn is_analytics(&self) -> bool {
        self.trim_timestamps
    }

    fn column_definition(&self, column: &Column) -> String {
        let nullable = if column.is_not_null() { "not null" } else { "null" };
        format!(
            "{} {} {}",
            self.quote(&column.name),
            self.data_type_name(column.data_type),
            nullable
        )
    }

    /// Key model: `unique key` on the primary key, otherwise `duplicate key`
    /// on the sort key or first column
    fn key_model(&self, table: &Table) -> Option<String> {
        if table.has_primary_key() {
            let keys: Vec<&str> = table.primary_key.iter().map(String::as_str).collect();
            return Some(format!("unique key ({})", self.quoted_comma_delimited(&keys)));
        }
        if table.has_sort_key() {
            let keys: Vec<&str> = table.sort_key.iter().map(String::as_str).collect();
            return Some(format!("duplicate key ({})", self.quoted_comma_delimited(&keys)));
        }
        table
            .first_column()
            .map(|c| format!("duplicate key ({})", self.quote(&c.name)))
    }

    fn distribution(&self, table: &Table) -> String {
        let column = table
            .primary_key
            .first()
            .or_else(|| table.sort_key.first())
            .or_else(|| table.first_column().map(|c| &c.name));

        match column {
            Some(column) => format!(
                "distributed by hash({}) buckets {}",
                self.quote(column),
                DORIS_BUCKETS
            ),
            None => format!("distributed by random buckets {}", DORIS_BUCKETS),
        }
    }
}

fn require_non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, SqlError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SqlError::InvalidArgument(format!("{} must not be blank", what)));
    }
    Ok(value)
}

impl SqlBuilder for DorisSqlBuilder {
    fn name(&self) -> &'static str {
        if self.trim_timestamps {
            "analytics-doris"
        } else {
            "doris"
        }
    }

    fn data_type_name(&self, data_type: DataType) -> String {
        match data_type {
            DataType::SmallInt => "smallint".to_string(),
            DataType::Integer => "int".to_string(),
            DataType::BigInt => "bigint".to_string(),
            DataType::Decimal => "decimal(18,6)".to_string(),
            DataType::Float => "float".to_string(),
            DataType::Double => "double".to_string(),
            DataType::Boolean => "boolean".to_string(),
            DataType::Character(length) => format!("char({})", length),
            DataType::Varchar(length) => format!("varchar({})", length),
            DataType::Text | DataType::Geometry | DataType::GeometryPoint => "string".to_string(),
            DataType::Date => "date".to_string(),
            DataType::Timestamp | DataType::TimestampTz => "datetime".to_string(),
            DataType::Json | DataType::Jsonb => "json".to_string(),
        }
    }

    fn index_type_btree(&self) -> Result<&'static str, SqlError> {
        Err(SqlError::unsupported(self.name(), "index_type_btree"))
    }

    fn index_type_gist(&self) -> Result<&'static str, SqlError> {
        Err(SqlError::unsupported(self.name(), "index_type_gist"))
    }

    fn index_type_gin(&self) -> Result<&'static str, SqlError> {
        Err(SqlError::unsupported(self.name(), "index_type_gin"))
    }

    fn supports_analyze(&self) -> bool {
        false
    }

    fn supports_vacuum(&self) -> bool {
        false
    }

    fn supports_indexes(&self) -> bool {
        false
    }

    fn supports_inheritance(&self) -> bool {
        false
    }

    fn supports_declarative_partitioning(&self) -> bool {
        false
    }

    fn supports_geospatial_data(&self) -> bool {
        false
    }

    fn supports_correlated_subquery(&self) -> bool {
        false
    }

    fn supports_multi_statements(&self) -> bool {
        false
    }

    fn quote_char(&self) -> char {
        QUOTE
    }

    fn escape(&self, value: &str) -> String {
        base::escape_with_backslashes(value)
    }

    fn create_table(&self, table: &Table) -> String {
        let columns = base::to_comma_separated(&table.columns, |c| self.column_definition(c));
        let key_model = self
            .key_model(table)
            .map(|k| format!(" {}", k))
            .unwrap_or_default();

        format!(
            "create table {} ({}) engine = olap{} {} properties (\"replication_num\" = \"{}\");",
            self.quote(&table.name),
            columns,
            key_model,
            self.distribution(table),
            DORIS_REPLICATION_NUM
        )
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "alter table {} rename {};",
            self.quote(&table.name),
            self.quote(new_name)
        )
    }

    fn table_exists(&self, name: &str) -> String {
        format!(
            "select t.table_name from information_schema.tables t \
             where t.table_schema = database() and t.table_name = {} \
             and t.table_type = 'BASE TABLE';",
            self.single_quote(name)
        )
    }

    fn qualify_table(&self, name: &str) -> String {
        format!(
            "{}.{}.{}",
            self.quote(&self.catalog),
            self.quote(POSTGRES_SCHEMA),
            self.quote(name)
        )
    }

    fn cast(&self, expression: &str, data_type: DataType) -> String {
        format!("cast({} as {})", expression, self.data_type_name(data_type))
    }

    fn json_extract(&self, json: &str, property: &str) -> String {
        format!(
            "json_unquote(json_extract({}, {}))",
            json,
            self.single_quote(&format!("$.{}", property))
        )
    }

    fn json_extract_nested(&self, json: &str, key: &str, property: &str) -> String {
        format!(
            "json_unquote(json_extract({}, {}))",
            json,
            self.single_quote(&format!("$.{}.{}", key, property))
        )
    }

    fn date_trunc(&self, unit: &str, source: &str) -> String {
        format!("date_trunc({}, {})", source, self.single_quote(unit))
    }

    fn difference_in_seconds(&self, end: &str, start: &str) -> String {
        format!("seconds_diff({}, {})", end, start)
    }

    fn is_true(&self, alias: &str, column: &str) -> String {
        format!("{} = true", self.quote_with_alias(alias, column))
    }

    fn is_false(&self, alias: &str, column: &str) -> String {
        format!("{} = false", self.quote_with_alias(alias, column))
    }

    fn regexp_match(&self, value: &str, pattern: &str) -> String {
        format!("{} regexp {}", value, pattern)
    }

    fn log10(&self, expression: &str) -> String {
        format!("log10({})", expression)
    }

    fn stddev(&self, expression: &str) -> String {
        format!("stddev_samp({})", expression)
    }

    fn variance(&self, expression: &str) -> String {
        format!("variance({})", expression)
    }

    fn numeric_cast(&self, expression: &str, precision: u32, scale: u32) -> String {
        format!("cast(({}) as decimal({},{}))", expression, precision, scale)
    }

    fn render_timestamp(&self, timestamp: Option<&str>) -> Result<Option<String>, SqlError> {
        if self.trim_timestamps {
            render_trimmed_timestamp(timestamp)
        } else {
            Ok(base::render_timestamp_verbatim(timestamp))
        }
    }

    fn as_catalog_federation(&self) -> Option<&dyn CatalogFederation> {
        Some(self)
    }
}

impl CatalogFederation for DorisSqlBuilder {
    fn catalog(&self) -> &str {
        &self.catalog
    }

    fn create_catalog(
        &self,
        connection_url: &str,
        username: &str,
        password: &str,
    ) -> Result<String, SqlError> {
        let url = JdbcUrl::postgres(connection_url)?;

        let properties = [
            ("type", "jdbc"),
            ("user", username),
            ("password", password),
            ("jdbc_url", url.url()),
            ("driver_url", self.driver_filename.as_str()),
            ("driver_class", POSTGRES_DRIVER_CLASS),
        ];
        let properties = base::to_comma_separated(&properties, |(key, value)| {
            format!("{} = {}", self.single_quote(key), self.single_quote(value))
        });

        Ok(format!(
            "create catalog {} properties ({});",
            self.quote(&self.catalog),
            properties
        ))
    }

    fn drop_catalog_if_exists(&self) -> String {
        format!("drop catalog if exists {};", self.quote(&self.catalog))
    }
}

#[cfg(test)]
#[path = "doris_builder_tests.rs"]
mod tests;
