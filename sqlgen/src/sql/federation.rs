//! Cross-engine federation extension points
//!
//! Columnar/MPP analytics engines read source tables that physically live in the
//! Postgres database. Doris mounts the database as a JDBC catalog; ClickHouse
//! reaches it through a named collection consumed by the `postgresql()` table
//! function. Only the dialects that need a bridge implement these traits;
//! [`SqlBuilder::as_catalog_federation`] and
//! [`SqlBuilder::as_named_collection_federation`] expose them on trait objects.

use serde_json::Value;

use super::{SqlBuilder, SqlError};
use crate::utils::jdbc::JdbcUrl;

/// Default Postgres port used when a connection URL omits one
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Bridge via an external JDBC catalog
pub trait CatalogFederation: SqlBuilder {
    /// Name of the catalog mounting the source database
    fn catalog(&self) -> &str;

    /// Create the catalog pointing at a `jdbc:postgresql://` database
    fn create_catalog(
        &self,
        connection_url: &str,
        username: &str,
        password: &str,
    ) -> Result<String, SqlError>;

    fn drop_catalog_if_exists(&self) -> String;
}

/// Bridge via a named collection of connection settings
pub trait NamedCollectionFederation: SqlBuilder {
    /// Name of the collection used when qualifying source tables
    fn named_collection(&self) -> &str;

    /// Create a named collection from ordered key/value pairs
    ///
    /// String values are rendered as literals; numbers and booleans verbatim.
    fn create_named_collection(
        &self,
        name: &str,
        key_values: &[(&str, Value)],
    ) -> Result<String, SqlError>;

    fn drop_named_collection_if_exists(&self, name: &str) -> String;

    /// Create this builder's collection from a `jdbc:postgresql://` URL
    fn create_postgres_named_collection(
        &self,
        connection_url: &str,
        username: &str,
        password: &str,
    ) -> Result<String, SqlError> {
        let url = JdbcUrl::postgres(connection_url)?;
        let database = url.database_name().ok_or_else(|| {
            SqlError::invalid_url(format!(
                "connection URL has no database name: {}",
                url.url()
            ))
        })?;

        self.create_named_collection(
            self.named_collection(),
            &[
                ("host", Value::from(url.host())),
                ("port", Value::from(url.port().unwrap_or(DEFAULT_POSTGRES_PORT))),
                ("username", Value::from(username)),
                ("password", Value::from(password)),
                ("database", Value::from(database)),
            ],
        )
    }
}
