//! Multi-dialect SQL generation for analytics tables
//!
//! Renders DDL, DML and expression fragments for PostgreSQL, ClickHouse and
//! Apache Doris from dialect-agnostic descriptors. See [`sql::SqlBuilder`].

pub mod app;
pub mod core;
pub mod model;
pub mod sql;
pub mod utils;
