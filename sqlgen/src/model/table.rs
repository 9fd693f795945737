//! Table descriptor

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::enums::Logged;
use crate::sql::SqlError;

/// A table to be rendered as DDL/DML
///
/// Column order is significant: it defines column order in `create table` and in
/// both projections of `insert ... select`. The sort key is used by columnar and
/// MPP dialects which have no primary key concept. The parent drives Postgres
/// table inheritance and is ignored by dialects without inheritance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub sort_key: Vec<String>,
    #[serde(default)]
    pub checks: Vec<String>,
    #[serde(default)]
    pub logged: Logged,
    #[serde(default)]
    pub parent: Option<Box<Table>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            primary_key: Vec::new(),
            sort_key: Vec::new(),
            checks: Vec::new(),
            logged: Logged::Logged,
            parent: None,
        }
    }

    pub fn with_primary_key<S: Into<String>>(self, primary_key: impl IntoIterator<Item = S>) -> Self {
        Self {
            primary_key: primary_key.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_sort_key<S: Into<String>>(self, sort_key: impl IntoIterator<Item = S>) -> Self {
        Self {
            sort_key: sort_key.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_checks<S: Into<String>>(self, checks: impl IntoIterator<Item = S>) -> Self {
        Self {
            checks: checks.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_logged(self, logged: Logged) -> Self {
        Self { logged, ..self }
    }

    pub fn with_parent(self, parent: Table) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            ..self
        }
    }

    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    pub fn has_sort_key(&self) -> bool {
        !self.sort_key.is_empty()
    }

    pub fn has_checks(&self) -> bool {
        !self.checks.is_empty()
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_unlogged(&self) -> bool {
        self.logged == Logged::Unlogged
    }

    pub fn first_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    fn has_column(&self, name: &str) -> bool {
        self.column_names().any(|c| c == name)
    }

    /// Check structural invariants
    ///
    /// Every primary key and sort key entry must name a declared column, and
    /// table and column names must be non-empty.
    pub fn validate(&self) -> Result<(), SqlError> {
        if self.name.trim().is_empty() {
            return Err(SqlError::InvalidTable("table name must not be blank".to_string()));
        }
        if let Some(position) = self.columns.iter().position(|c| c.name.is_empty()) {
            return Err(SqlError::InvalidTable(format!(
                "column {} of table '{}' has an empty name",
                position, self.name
            )));
        }
        for key in self.primary_key.iter().chain(self.sort_key.iter()) {
            if !self.has_column(key) {
                return Err(SqlError::InvalidTable(format!(
                    "key column '{}' is not a column of table '{}'",
                    key, self.name
                )));
            }
        }
        if let Some(parent) = &self.parent {
            parent.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataType;

    fn immunization() -> Table {
        Table::new(
            "immunization",
            vec![
                Column::not_null("id", DataType::BigInt),
                Column::not_null("data", DataType::Character(11)),
                Column::new("value", DataType::Double),
            ],
        )
    }

    #[test]
    fn test_new_has_no_keys() {
        let table = immunization();
        assert!(table.has_columns());
        assert!(!table.has_primary_key());
        assert!(!table.has_sort_key());
        assert!(!table.has_checks());
        assert!(!table.has_parent());
        assert!(!table.is_unlogged());
    }

    #[test]
    fn test_builder_methods() {
        let parent = Table::new("vaccination", vec![]);
        let table = immunization()
            .with_primary_key(["id"])
            .with_sort_key(["data"])
            .with_checks(["\"value\">0"])
            .with_logged(Logged::Unlogged)
            .with_parent(parent.clone());

        assert_eq!(table.primary_key, vec!["id".to_string()]);
        assert_eq!(table.sort_key, vec!["data".to_string()]);
        assert_eq!(table.checks, vec!["\"value\">0".to_string()]);
        assert!(table.is_unlogged());
        assert_eq!(table.parent.as_deref(), Some(&parent));
    }

    #[test]
    fn test_column_names_preserve_order() {
        let table = immunization();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["id", "data", "value"]);
        assert_eq!(table.first_column().unwrap().name, "id");
    }

    #[test]
    fn test_validate_ok() {
        assert!(immunization().with_primary_key(["id"]).validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_primary_key() {
        let err = immunization().with_primary_key(["uid"]).validate().unwrap_err();
        assert!(matches!(err, SqlError::InvalidTable(_)));
        assert!(err.to_string().contains("'uid'"));
    }

    #[test]
    fn test_validate_unknown_sort_key() {
        let result = immunization().with_sort_key(["period"]).validate();
        assert!(matches!(result, Err(SqlError::InvalidTable(_))));
    }

    #[test]
    fn test_validate_blank_name() {
        let result = Table::new("  ", vec![]).validate();
        assert!(matches!(result, Err(SqlError::InvalidTable(_))));
    }

    #[test]
    fn test_validate_checks_parent() {
        let parent = Table::new("", vec![]);
        let result = immunization().with_parent(parent).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{
            "name": "vaccination",
            "columns": [{"name": "id", "data_type": "integer", "nullable": "not_null"}],
            "primary_key": ["id"]
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(
            table,
            Table::new("vaccination", vec![Column::not_null("id", DataType::Integer)])
                .with_primary_key(["id"])
        );
    }
}
