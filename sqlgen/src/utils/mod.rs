//! Utility functions shared by the SQL builders

pub mod jdbc;
pub mod string;
pub mod time;
