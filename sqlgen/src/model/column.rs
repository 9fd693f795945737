//! Column descriptor

use serde::{Deserialize, Serialize};

use super::enums::{Collation, DataType, Nullable};

/// A table column: name, semantic type, nullability and collation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: Nullable,
    #[serde(default)]
    pub collation: Collation,
}

impl Column {
    /// Nullable column with default collation
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: Nullable::Null,
            collation: Collation::Default,
        }
    }

    /// Non-nullable column with default collation
    pub fn not_null(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            nullable: Nullable::NotNull,
            ..Self::new(name, data_type)
        }
    }

    pub fn with_nullable(self, nullable: Nullable) -> Self {
        Self { nullable, ..self }
    }

    pub fn with_collation(self, collation: Collation) -> Self {
        Self { collation, ..self }
    }

    pub fn is_not_null(&self) -> bool {
        self.nullable == Nullable::NotNull
    }

    pub fn has_collation(&self) -> bool {
        self.collation != Collation::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_nullable() {
        let column = Column::new("created", DataType::Timestamp);
        assert_eq!(column.nullable, Nullable::Null);
        assert!(!column.is_not_null());
        assert!(!column.has_collation());
    }

    #[test]
    fn test_not_null() {
        let column = Column::not_null("id", DataType::BigInt);
        assert!(column.is_not_null());
        assert_eq!(column.data_type, DataType::BigInt);
    }

    #[test]
    fn test_with_collation() {
        let column = Column::new("name", DataType::Varchar(255)).with_collation(Collation::C);
        assert!(column.has_collation());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"name": "value", "data_type": "double"}"#;
        let column: Column = serde_json::from_str(json).unwrap();
        assert_eq!(column, Column::new("value", DataType::Double));
    }

    #[test]
    fn test_structural_equality() {
        let a = Column::not_null("id", DataType::Integer);
        let b = Column::new("id", DataType::Integer).with_nullable(Nullable::NotNull);
        assert_eq!(a, b);
    }
}
