//! PostgreSQL SQL builder implementation

use super::base;
use super::{SqlBuilder, SqlError};
use crate::core::constants::POSTGRES_SCHEMA;
use crate::model::{Column, DataType, Index, Table};

const QUOTE: char = '"';

/// PostgreSQL SQL builder
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresSqlBuilder;

impl PostgresSqlBuilder {
    fn column_definition(&self, column: &Column) -> String {
        let nullable = if column.is_not_null() {
            " not null"
        } else {
            " null"
        };
        let collation = if column.has_collation() {
            format!(" collate {}", self.quote(column.collation.as_str()))
        } else {
            String::new()
        };
        format!(
            "{} {}{}{}",
            self.quote(&column.name),
            self.data_type_name(column.data_type),
            nullable,
            collation
        )
    }

    fn index_column(&self, index: &Index, column: &str) -> String {
        let column = match index.function {
            Some(function) => format!("{}({})", function.as_str(), self.quote(column)),
            None => self.quote(column),
        };
        match index.sort_order {
            Some(order) => format!("{} {}", column, order.as_str()),
            None => column,
        }
    }
}

impl SqlBuilder for PostgresSqlBuilder {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn data_type_name(&self, data_type: DataType) -> String {
        match data_type {
            DataType::SmallInt => "smallint".to_string(),
            DataType::Integer => "integer".to_string(),
            DataType::BigInt => "bigint".to_string(),
            DataType::Decimal => "numeric(18,6)".to_string(),
            DataType::Float => "real".to_string(),
            DataType::Double => "double precision".to_string(),
            DataType::Boolean => "boolean".to_string(),
            DataType::Character(length) => format!("char({})", length),
            DataType::Varchar(length) => format!("varchar({})", length),
            DataType::Text => "text".to_string(),
            DataType::Date => "date".to_string(),
            DataType::Timestamp => "timestamp".to_string(),
            DataType::TimestampTz => "timestamptz".to_string(),
            DataType::Geometry => "geometry".to_string(),
            DataType::GeometryPoint => "geometry(Point, 4326)".to_string(),
            DataType::Json => "json".to_string(),
            DataType::Jsonb => "jsonb".to_string(),
        }
    }

    fn index_type_btree(&self) -> Result<&'static str, SqlError> {
        Ok("btree")
    }

    fn index_type_gist(&self) -> Result<&'static str, SqlError> {
        Ok("gist")
    }

    fn index_type_gin(&self) -> Result<&'static str, SqlError> {
        Ok("gin")
    }

    fn supports_analyze(&self) -> bool {
        true
    }

    fn supports_vacuum(&self) -> bool {
        true
    }

    fn supports_indexes(&self) -> bool {
        true
    }

    fn supports_inheritance(&self) -> bool {
        true
    }

    fn supports_declarative_partitioning(&self) -> bool {
        true
    }

    fn supports_geospatial_data(&self) -> bool {
        true
    }

    fn supports_correlated_subquery(&self) -> bool {
        true
    }

    fn supports_multi_statements(&self) -> bool {
        true
    }

    fn quote_char(&self) -> char {
        QUOTE
    }

    fn escape(&self, value: &str) -> String {
        // standard_conforming_strings: backslash is a literal character
        base::escape_single_quotes(value)
    }

    fn create_table(&self, table: &Table) -> String {
        let unlogged = if table.is_unlogged() { "unlogged " } else { "" };

        let mut elements: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect();

        if table.has_primary_key() {
            elements.push(format!(
                "primary key ({})",
                base::to_comma_separated(&table.primary_key, |k| self.quote(k))
            ));
        }

        elements.extend(table.checks.iter().map(|check| format!("check({})", check)));

        let inherits = match &table.parent {
            Some(parent) => format!(" inherits ({})", self.quote(&parent.name)),
            None => String::new(),
        };

        format!(
            "create {}table {} ({}){};",
            unlogged,
            self.quote(&table.name),
            elements.join(", "),
            inherits
        )
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "alter table {} rename to {};",
            self.quote(&table.name),
            self.quote(new_name)
        )
    }

    fn drop_table_if_exists_cascade(&self, name: &str) -> String {
        format!("drop table if exists {} cascade;", self.quote(name))
    }

    fn set_parent_table(&self, table: &Table, parent_name: &str) -> Result<String, SqlError> {
        Ok(format!(
            "alter table {} inherit {};",
            self.quote(&table.name),
            self.quote(parent_name)
        ))
    }

    fn remove_parent_table(&self, table: &Table, parent_name: &str) -> Result<String, SqlError> {
        Ok(format!(
            "alter table {} no inherit {};",
            self.quote(&table.name),
            self.quote(parent_name)
        ))
    }

    fn create_index(&self, index: &Index) -> Result<String, SqlError> {
        index.validate()?;

        let unique = if index.is_unique() { "unique " } else { "" };
        let type_name = self.index_type_name(index.index_type)?;
        let columns = base::to_comma_separated(&index.columns, |c| self.index_column(index, c));
        let condition = index
            .condition
            .as_deref()
            .map(|c| format!(" where {}", c))
            .unwrap_or_default();

        Ok(format!(
            "create {}index {} on {} using {}({}){};",
            unique,
            self.quote(&index.name),
            self.quote(&index.table_name),
            type_name,
            columns,
            condition
        ))
    }

    fn analyze_table(&self, name: &str) -> Result<String, SqlError> {
        Ok(format!("analyze {};", self.quote(name)))
    }

    fn vacuum_table(&self, name: &str) -> Result<String, SqlError> {
        Ok(format!("vacuum {};", self.quote(name)))
    }

    fn table_exists(&self, name: &str) -> String {
        format!(
            "select t.table_name from information_schema.tables t \
             where t.table_schema = {} and t.table_name = {} \
             and t.table_type = 'BASE TABLE';",
            self.single_quote(POSTGRES_SCHEMA),
            self.single_quote(name)
        )
    }

    fn cast(&self, expression: &str, data_type: DataType) -> String {
        format!("{}::{}", expression, self.data_type_name(data_type))
    }

    fn json_extract(&self, json: &str, property: &str) -> String {
        format!("{} ->> {}", json, self.single_quote(property))
    }

    fn json_extract_nested(&self, json: &str, key: &str, property: &str) -> String {
        format!(
            "{} #>> {}",
            json,
            self.single_quote(&format!("{{{}, {}}}", key, property))
        )
    }

    fn date_trunc(&self, unit: &str, source: &str) -> String {
        format!("date_trunc({}, {})", self.single_quote(unit), source)
    }

    fn difference_in_seconds(&self, end: &str, start: &str) -> String {
        format!("extract(epoch from ({} - {}))", end, start)
    }

    fn is_true(&self, alias: &str, column: &str) -> String {
        self.quote_with_alias(alias, column)
    }

    fn is_false(&self, alias: &str, column: &str) -> String {
        format!("not {}", self.quote_with_alias(alias, column))
    }

    fn regexp_match(&self, value: &str, pattern: &str) -> String {
        format!("{} ~* {}", value, pattern)
    }

    fn log10(&self, expression: &str) -> String {
        format!("log({})", expression)
    }

    fn stddev(&self, expression: &str) -> String {
        format!("stddev_samp({})", expression)
    }

    fn variance(&self, expression: &str) -> String {
        format!("variance({})", expression)
    }

    fn numeric_cast(&self, expression: &str, precision: u32, scale: u32) -> String {
        format!("({})::numeric({},{})", expression, precision, scale)
    }
}

#[cfg(test)]
#[path = "postgres_builder_tests.rs"]
mod tests;
