//! SQL builder trait for multi-dialect support
//!
//! This trait defines every SQL-text-producing operation the analytics table
//! pipeline needs, independent of the target engine.

use super::SqlError;
use super::base;
use super::federation::{CatalogFederation, NamedCollectionFederation};
use crate::model::{DataType, Index, IndexType, Table};

/// Table alias used by [`SqlBuilder::quote_ax`]
pub const ALIAS_AX: &str = "ax";

/// SQL builder trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Identifier quoting (`"col"` vs `` `col` ``)
/// - Type names (`double precision` vs `Float64` vs `double`)
/// - Table storage clauses (inheritance, engines, distribution keys)
/// - Conditionals, JSON extraction and aggregates
///
/// Every method is a pure function of its inputs. Statement builders return text
/// terminated by `;`; expression helpers return bare fragments. Operations a
/// dialect cannot express return [`SqlError::Unsupported`] and are guarded by a
/// `supports_*` predicate callers should check first.
pub trait SqlBuilder: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    // ========================================================================
    // Data types
    // ========================================================================

    /// Native type name for a semantic data type
    fn data_type_name(&self, data_type: DataType) -> String;

    fn data_type_small_int(&self) -> String {
        self.data_type_name(DataType::SmallInt)
    }

    fn data_type_integer(&self) -> String {
        self.data_type_name(DataType::Integer)
    }

    fn data_type_big_int(&self) -> String {
        self.data_type_name(DataType::BigInt)
    }

    fn data_type_decimal(&self) -> String {
        self.data_type_name(DataType::Decimal)
    }

    fn data_type_float(&self) -> String {
        self.data_type_name(DataType::Float)
    }

    fn data_type_double(&self) -> String {
        self.data_type_name(DataType::Double)
    }

    fn data_type_boolean(&self) -> String {
        self.data_type_name(DataType::Boolean)
    }

    fn data_type_character(&self, length: u16) -> String {
        self.data_type_name(DataType::Character(length))
    }

    fn data_type_varchar(&self, length: u16) -> String {
        self.data_type_name(DataType::Varchar(length))
    }

    fn data_type_text(&self) -> String {
        self.data_type_name(DataType::Text)
    }

    fn data_type_date(&self) -> String {
        self.data_type_name(DataType::Date)
    }

    fn data_type_timestamp(&self) -> String {
        self.data_type_name(DataType::Timestamp)
    }

    fn data_type_timestamp_tz(&self) -> String {
        self.data_type_name(DataType::TimestampTz)
    }

    fn data_type_geometry(&self) -> String {
        self.data_type_name(DataType::Geometry)
    }

    fn data_type_geometry_point(&self) -> String {
        self.data_type_name(DataType::GeometryPoint)
    }

    fn data_type_json(&self) -> String {
        self.data_type_name(DataType::Jsonb)
    }

    // ========================================================================
    // Index types
    // ========================================================================

    fn index_type_btree(&self) -> Result<&'static str, SqlError>;

    fn index_type_gist(&self) -> Result<&'static str, SqlError>;

    fn index_type_gin(&self) -> Result<&'static str, SqlError>;

    fn index_type_name(&self, index_type: IndexType) -> Result<&'static str, SqlError> {
        match index_type {
            IndexType::Btree => self.index_type_btree(),
            IndexType::Gist => self.index_type_gist(),
            IndexType::Gin => self.index_type_gin(),
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    fn supports_analyze(&self) -> bool;

    fn supports_vacuum(&self) -> bool;

    /// Whether [`SqlBuilder::create_index`] is available
    fn supports_indexes(&self) -> bool;

    /// Whether parent tables and `inherit`/`no inherit` are available
    fn supports_inheritance(&self) -> bool;

    fn supports_declarative_partitioning(&self) -> bool;

    fn supports_geospatial_data(&self) -> bool;

    fn supports_correlated_subquery(&self) -> bool;

    fn supports_multi_statements(&self) -> bool;

    // ========================================================================
    // Quoting and escaping
    // ========================================================================

    /// Identifier quote character
    fn quote_char(&self) -> char;

    /// Quote an identifier, doubling embedded quote characters
    fn quote(&self, identifier: &str) -> String {
        base::quote_with(self.quote_char(), identifier)
    }

    /// Quote an identifier and prefix it with an unquoted alias
    fn quote_with_alias(&self, alias: &str, identifier: &str) -> String {
        format!("{}.{}", alias, self.quote(identifier))
    }

    /// Quote an identifier with the `ax` alias
    fn quote_ax(&self, identifier: &str) -> String {
        self.quote_with_alias(ALIAS_AX, identifier)
    }

    /// Inverse of [`SqlBuilder::quote`]
    fn unquote(&self, text: &str) -> String {
        base::unquote_with(self.quote_char(), text)
    }

    /// Escape a value for interpolation into a caller-quoted string literal
    fn escape(&self, value: &str) -> String;

    /// Render a string literal
    fn single_quote(&self, value: &str) -> String {
        format!("'{}'", self.escape(value))
    }

    /// Render `'a', 'b', 'c'`; empty input gives an empty string
    fn single_quoted_comma_delimited(&self, values: &[&str]) -> String {
        base::to_comma_separated(values, |v| self.single_quote(v))
    }

    /// Render `a, b, c`
    fn comma_delimited(&self, values: &[&str]) -> String {
        values.join(", ")
    }

    /// Render quoted identifiers separated by commas
    fn quoted_comma_delimited(&self, values: &[&str]) -> String {
        base::to_comma_separated(values, |v| self.quote(v))
    }

    // ========================================================================
    // DDL statements
    // ========================================================================

    fn create_table(&self, table: &Table) -> String;

    fn rename_table(&self, table: &Table, new_name: &str) -> String;

    fn drop_table_if_exists(&self, name: &str) -> String {
        format!("drop table if exists {};", self.quote(name))
    }

    /// Drop including dependent objects, where the dialect has such a notion
    fn drop_table_if_exists_cascade(&self, name: &str) -> String {
        self.drop_table_if_exists(name)
    }

    /// Replace `new_name` with `table`: drop the destination, then rename
    fn swap_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "{} {}",
            self.drop_table_if_exists_cascade(new_name),
            self.rename_table(table, new_name)
        )
    }

    fn set_parent_table(&self, _table: &Table, _parent_name: &str) -> Result<String, SqlError> {
        Err(SqlError::unsupported(self.name(), "set_parent_table"))
    }

    fn remove_parent_table(
        &self,
        _table: &Table,
        _parent_name: &str,
    ) -> Result<String, SqlError> {
        Err(SqlError::unsupported(self.name(), "remove_parent_table"))
    }

    /// Move `table` from `parent_name` to `new_parent_name`
    fn swap_parent_table(
        &self,
        table: &Table,
        parent_name: &str,
        new_parent_name: &str,
    ) -> Result<String, SqlError> {
        Ok(format!(
            "{} {}",
            self.remove_parent_table(table, parent_name)?,
            self.set_parent_table(table, new_parent_name)?
        ))
    }

    fn create_index(&self, _index: &Index) -> Result<String, SqlError> {
        Err(SqlError::unsupported(self.name(), "create_index"))
    }

    fn analyze_table(&self, _name: &str) -> Result<String, SqlError> {
        Err(SqlError::unsupported(self.name(), "analyze_table"))
    }

    fn vacuum_table(&self, _name: &str) -> Result<String, SqlError> {
        Err(SqlError::unsupported(self.name(), "vacuum_table"))
    }

    /// Select returning a row when `name` is a base table (never a view)
    fn table_exists(&self, name: &str) -> String;

    fn count_rows(&self, table: &Table) -> String {
        format!(
            "select count(*) as row_count from {};",
            self.quote(&table.name)
        )
    }

    /// Copy rows from `source` using the table's column order on both sides
    fn insert_into_select_from(&self, table: &Table, source: &str) -> String {
        let columns = base::to_comma_separated(&table.columns, |c| self.quote(&c.name));
        format!(
            "insert into {} ({}) select {} from {};",
            self.quote(&table.name),
            columns,
            columns,
            source
        )
    }

    /// Reference to a table in the source (transactional) database
    fn qualify_table(&self, name: &str) -> String {
        self.quote(name)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn cast(&self, expression: &str, data_type: DataType) -> String;

    fn if_then(&self, condition: &str, result: &str) -> String {
        format!("case when {} then {} end", condition, result)
    }

    fn if_then_else(&self, condition: &str, then_result: &str, else_result: &str) -> String {
        format!(
            "case when {} then {} else {} end",
            condition, then_result, else_result
        )
    }

    /// Conditional with several `(condition, result)` branches and a fallback
    ///
    /// Without branches the fallback is returned as is.
    fn if_then_else_multi(&self, branches: &[(&str, &str)], else_result: &str) -> String {
        if branches.is_empty() {
            return else_result.to_string();
        }
        let whens: String = branches
            .iter()
            .map(|(condition, result)| format!("when {} then {} ", condition, result))
            .collect();
        format!("case {}else {} end", whens, else_result)
    }

    /// Text value of a top-level JSON property
    fn json_extract(&self, json: &str, property: &str) -> String;

    /// Text value of `property` inside the JSON object under `key`
    fn json_extract_nested(&self, json: &str, key: &str, property: &str) -> String;

    fn date_trunc(&self, unit: &str, source: &str) -> String;

    /// Seconds elapsed from `start` to `end`
    fn difference_in_seconds(&self, end: &str, start: &str) -> String;

    fn is_true(&self, alias: &str, column: &str) -> String;

    fn is_false(&self, alias: &str, column: &str) -> String;

    /// Case-insensitive regular expression match
    fn regexp_match(&self, value: &str, pattern: &str) -> String;

    fn log10(&self, expression: &str) -> String;

    fn stddev(&self, expression: &str) -> String;

    fn variance(&self, expression: &str) -> String;

    /// Cast an aggregate operand to `numeric(precision, scale)`
    fn numeric_cast(&self, expression: &str, precision: u32, scale: u32) -> String;

    /// Decimalize an aggregate call, leaving `COUNT` untouched
    fn aggr_decimal(&self, expression: &str, precision: u32, scale: u32) -> String {
        base::aggr_decimal(expression, precision, scale, |e, p, s| {
            self.numeric_cast(e, p, s)
        })
    }

    fn concat(&self, values: &[&str]) -> String {
        format!("concat({})", values.join(", "))
    }

    /// Concatenation treating null operands as empty strings
    fn safe_concat(&self, values: &[&str]) -> String {
        let values = base::to_comma_separated(values, |v| self.coalesce(v, "''"));
        format!("concat({})", values)
    }

    fn trim(&self, expression: &str) -> String {
        format!("trim({})", expression)
    }

    fn coalesce(&self, expression: &str, default_value: &str) -> String {
        format!("coalesce({}, {})", expression, default_value)
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Map an arbitrary label to a column name legal in this dialect
    fn to_valid_column_name(&self, name: Option<&str>) -> Option<String> {
        base::to_valid_column_name(name)
    }

    /// Render an ISO local date-time for use as a literal
    fn render_timestamp(&self, timestamp: Option<&str>) -> Result<Option<String>, SqlError> {
        Ok(base::render_timestamp_verbatim(timestamp))
    }

    // ========================================================================
    // Federation extension points
    // ========================================================================

    fn as_catalog_federation(&self) -> Option<&dyn CatalogFederation> {
        None
    }

    fn as_named_collection_federation(&self) -> Option<&dyn NamedCollectionFederation> {
        None
    }
}
