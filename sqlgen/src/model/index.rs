//! Index descriptor

use serde::{Deserialize, Serialize};

use super::enums::{IndexFunction, IndexType, SortOrder, Unique};
use crate::sql::SqlError;

/// An index on one or more columns of a table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub table_name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub index_type: IndexType,
    #[serde(default)]
    pub unique: Unique,
    #[serde(default)]
    pub function: Option<IndexFunction>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    /// Partial index predicate, rendered as a `where` clause
    #[serde(default)]
    pub condition: Option<String>,
}

impl Index {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        table_name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            index_type: IndexType::Btree,
            unique: Unique::NonUnique,
            function: None,
            sort_order: None,
            condition: None,
        }
    }

    pub fn with_type(self, index_type: IndexType) -> Self {
        Self { index_type, ..self }
    }

    pub fn unique(self) -> Self {
        Self {
            unique: Unique::Unique,
            ..self
        }
    }

    pub fn with_function(self, function: IndexFunction) -> Self {
        Self {
            function: Some(function),
            ..self
        }
    }

    pub fn with_sort_order(self, sort_order: SortOrder) -> Self {
        Self {
            sort_order: Some(sort_order),
            ..self
        }
    }

    pub fn with_condition(self, condition: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
            ..self
        }
    }

    pub fn is_unique(&self) -> bool {
        self.unique == Unique::Unique
    }

    pub fn validate(&self) -> Result<(), SqlError> {
        if self.name.trim().is_empty() {
            return Err(SqlError::InvalidIndex("index name must not be blank".to_string()));
        }
        if self.table_name.trim().is_empty() {
            return Err(SqlError::InvalidIndex(format!(
                "index '{}' has no table name",
                self.name
            )));
        }
        if self.columns.is_empty() {
            return Err(SqlError::InvalidIndex(format!(
                "index '{}' must have at least one column",
                self.name
            )));
        }
        Ok(())
    }
}
