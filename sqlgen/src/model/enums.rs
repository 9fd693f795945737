//! Supporting enums for schema descriptors
//!
//! These enums are dialect-agnostic. Every SQL builder maps them onto its own
//! native tokens.

use serde::{Deserialize, Serialize};

// ============================================================================
// DATA TYPES
// ============================================================================

/// Semantic column data type
///
/// Character types carry their length. Each dialect owns a total mapping from
/// these variants to a native type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Float,
    Double,
    Boolean,
    Character(u16),
    Varchar(u16),
    Text,
    Date,
    Timestamp,
    TimestampTz,
    Geometry,
    GeometryPoint,
    Json,
    Jsonb,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::SmallInt | Self::Integer | Self::BigInt | Self::Decimal | Self::Float | Self::Double
        )
    }

    pub fn is_character(&self) -> bool {
        matches!(self, Self::Character(_) | Self::Varchar(_) | Self::Text)
    }
}

// ============================================================================
// COLUMN MODIFIERS
// ============================================================================

/// Column nullability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Nullable {
    NotNull,
    #[default]
    Null,
}

/// Column collation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    #[default]
    Default,
    C,
}

impl Collation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::C => "C",
        }
    }
}

// ============================================================================
// TABLE MODIFIERS
// ============================================================================

/// Whether table writes go to the write-ahead log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Logged {
    #[default]
    Logged,
    Unlogged,
}

// ============================================================================
// INDEX MODIFIERS
// ============================================================================

/// Index access method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    #[default]
    Btree,
    Gist,
    Gin,
}

/// Function applied to every indexed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexFunction {
    Upper,
    Lower,
}

impl IndexFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

/// Index uniqueness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Unique {
    Unique,
    #[default]
    NonUnique,
}

/// Per-column sort order suffix for indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
    AscNullsFirst,
    DescNullsLast,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::AscNullsFirst => "asc nulls first",
            Self::DescNullsLast => "desc nulls last",
        }
    }
}
