//! ClickHouse SQL builder implementation

use serde_json::Value;

use super::base;
use super::federation::NamedCollectionFederation;
use super::{SqlBuilder, SqlError};
use crate::core::constants::DEFAULT_NAMED_COLLECTION;
use crate::model::{Column, DataType, Table};
use crate::utils::jdbc::JdbcUrl;

const QUOTE: char = '"';

/// Database expression used when the connection URL names no database
const CURRENT_DATABASE: &str = "currentDatabase()";

/// ClickHouse SQL builder
///
/// Bound to the ClickHouse connection URL so that catalog lookups can be scoped
/// to the configured database. Source tables are read through the `postgresql()`
/// table function using a named collection.
#[derive(Debug, Clone)]
pub struct ClickHouseSqlBuilder {
    connection: JdbcUrl,
    named_collection: String,
}

impl ClickHouseSqlBuilder {
    /// Create a builder for a `jdbc:clickhouse://` URL with the default collection
    pub fn new(connection_url: &str) -> Result<Self, SqlError> {
        Self::with_named_collection(connection_url, DEFAULT_NAMED_COLLECTION)
    }

    pub fn with_named_collection(
        connection_url: &str,
        named_collection: &str,
    ) -> Result<Self, SqlError> {
        let connection = JdbcUrl::clickhouse(connection_url)?;

        let named_collection = named_collection.trim();
        if named_collection.is_empty() {
            return Err(SqlError::InvalidArgument(
                "named collection must not be blank".to_string(),
            ));
        }

        tracing::debug!(
            database = ?connection.database_name(),
            named_collection,
            "Created ClickHouse SQL builder"
        );

        Ok(Self {
            connection,
            named_collection: named_collection.to_string(),
        })
    }

    /// Database name taken from the connection URL
    pub fn database_name(&self) -> Option<&str> {
        self.connection.database_name()
    }

    fn column_definition(&self, column: &Column) -> String {
        let type_name = self.data_type_name(column.data_type);
        let type_name = if column.is_not_null() || !can_be_nullable(column.data_type) {
            type_name
        } else {
            format!("Nullable({})", type_name)
        };
        format!("{} {}", self.quote(&column.name), type_name)
    }

    /// `order by` key: primary key, else sort key, else first column
    fn order_by(&self, table: &Table) -> String {
        let key: Vec<&str> = if table.has_primary_key() {
            table.primary_key.iter().map(String::as_str).collect()
        } else if table.has_sort_key() {
            table.sort_key.iter().map(String::as_str).collect()
        } else {
            table.first_column().map(|c| c.name.as_str()).into_iter().collect()
        };

        if key.is_empty() {
            "tuple()".to_string()
        } else {
            format!("({})", self.quoted_comma_delimited(&key))
        }
    }

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.single_quote(s),
            other => other.to_string(),
        }
    }
}

/// Composite types ClickHouse refuses inside `Nullable(..)`
fn can_be_nullable(data_type: DataType) -> bool {
    !matches!(
        data_type,
        DataType::Json | DataType::Jsonb | DataType::GeometryPoint
    )
}

impl SqlBuilder for ClickHouseSqlBuilder {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn data_type_name(&self, data_type: DataType) -> String {
        match data_type {
            DataType::SmallInt => "Int16",
            DataType::Integer => "Int32",
            DataType::BigInt => "Int64",
            DataType::Decimal => "Decimal(18,6)",
            DataType::Float => "Float32",
            DataType::Double => "Float64",
            DataType::Boolean => "Bool",
            DataType::Character(_) | DataType::Varchar(_) | DataType::Text => "String",
            DataType::Date => "Date",
            DataType::Timestamp => "DateTime64(3)",
            DataType::TimestampTz => "DateTime64(3, 'UTC')",
            DataType::Geometry => "String",
            DataType::GeometryPoint => "Point",
            DataType::Json | DataType::Jsonb => "JSON",
        }
        .to_string()
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
        format!(
            "create table {} ({}) engine = MergeTree() order by {};",
            self.quote(&table.name),
            columns,
            self.order_by(table)
        )
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "rename table {} to {};",
            self.quote(&table.name),
            self.quote(new_name)
        )
    }

    fn table_exists(&self, name: &str) -> String {
        let database = match self.database_name() {
            Some(database) => self.single_quote(database),
            None => CURRENT_DATABASE.to_string(),
        };
        format!(
            "select t.name as table_name from system.tables t \
             where t.database = {} and t.name = {} \
             and t.engine not in ('View', 'MaterializedView', 'LiveView');",
            database,
            self.single_quote(name)
        )
    }

    fn qualify_table(&self, name: &str) -> String {
        format!(
            "postgresql({}, table = {})",
            self.named_collection,
            self.single_quote(name)
        )
    }

    fn cast(&self, expression: &str, data_type: DataType) -> String {
        format!("cast({} as {})", expression, self.data_type_name(data_type))
    }

    fn if_then(&self, condition: &str, result: &str) -> String {
        format!("if({}, {}, null)", condition, result)
    }

    fn if_then_else(&self, condition: &str, then_result: &str, else_result: &str) -> String {
        format!("if({}, {}, {})", condition, then_result, else_result)
    }

    fn if_then_else_multi(&self, branches: &[(&str, &str)], else_result: &str) -> String {
        if branches.is_empty() {
            return else_result.to_string();
        }
        let arguments: String = branches
            .iter()
            .map(|(condition, result)| format!("{}, {}, ", condition, result))
            .collect();
        format!("multiIf({}{})", arguments, else_result)
    }

    fn json_extract(&self, json: &str, property: &str) -> String {
        format!("JSONExtractString({}, {})", json, self.single_quote(property))
    }

    fn json_extract_nested(&self, json: &str, key: &str, property: &str) -> String {
        format!(
            "JSONExtractString({}, {}, {})",
            json,
            self.single_quote(key),
            self.single_quote(property)
        )
    }

    fn date_trunc(&self, unit: &str, source: &str) -> String {
        format!("date_trunc({}, {})", self.single_quote(unit), source)
    }

    fn difference_in_seconds(&self, end: &str, start: &str) -> String {
        format!("dateDiff('second', {}, {})", start, end)
    }

    fn is_true(&self, alias: &str, column: &str) -> String {
        format!("{} = true", self.quote_with_alias(alias, column))
    }

    fn is_false(&self, alias: &str, column: &str) -> String {
        format!("{} = false", self.quote_with_alias(alias, column))
    }

    fn regexp_match(&self, value: &str, pattern: &str) -> String {
        format!("match({}, {})", value, pattern)
    }

    fn log10(&self, expression: &str) -> String {
        format!("log10({})", expression)
    }

    fn stddev(&self, expression: &str) -> String {
        format!("stddevSamp({})", expression)
    }

    fn variance(&self, expression: &str) -> String {
        format!("varSamp({})", expression)
    }

    fn numeric_cast(&self, expression: &str, precision: u32, scale: u32) -> String {
        format!("cast(({}) as Decimal({},{}))", expression, precision, scale)
    }

    fn as_named_collection_federation(&self) -> Option<&dyn NamedCollectionFederation> {
        Some(self)
    }
}

impl NamedCollectionFederation for ClickHouseSqlBuilder {
    fn named_collection(&self) -> &str {
        &self.named_collection
    }

    fn create_named_collection(
        &self,
        name: &str,
        key_values: &[(&str, Value)],
    ) -> Result<String, SqlError> {
        if key_values.is_empty() {
            return Err(SqlError::InvalidArgument(format!(
                "named collection '{}' must have at least one key",
                name
            )));
        }

        let pairs = base::to_comma_separated(key_values, |(key, value)| {
            format!("{} = {}", key, self.literal(value))
        });
        Ok(format!(
            "create named collection {} as {};",
            self.quote(name),
            pairs
        ))
    }

    fn drop_named_collection_if_exists(&self, name: &str) -> String {
        format!("drop named collection if exists {};", self.quote(name))
    }
}

#[cfg(test)]
#[path = "clickhouse_builder_tests.rs"]
mod tests;
