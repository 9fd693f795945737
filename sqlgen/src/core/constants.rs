// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for binaries, log targets and identifiers)
pub const APP_NAME_LOWER: &str = "sqlgen";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sqlgen.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SQLGEN_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SQLGEN_LOG";

/// Default log filter; logs go to stderr so stdout only carries SQL
pub const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// Environment Variables - Dialect
// =============================================================================

/// Environment variable for the target dialect
pub const ENV_DIALECT: &str = "SQLGEN_DIALECT";

/// Environment variable for the analytics database connection URL
pub const ENV_CONNECTION_URL: &str = "SQLGEN_CONNECTION_URL";

/// Environment variable for the Doris JDBC catalog name
pub const ENV_CATALOG: &str = "SQLGEN_CATALOG";

/// Environment variable for the Doris JDBC driver jar
pub const ENV_DRIVER_FILENAME: &str = "SQLGEN_DRIVER_FILENAME";

/// Environment variable for the ClickHouse named collection
pub const ENV_NAMED_COLLECTION: &str = "SQLGEN_NAMED_COLLECTION";

// =============================================================================
// Federation Defaults
// =============================================================================

/// Schema holding source tables in the Postgres database
pub const POSTGRES_SCHEMA: &str = "public";

/// Default JDBC catalog mounting the Postgres database in Doris
pub const DEFAULT_CATALOG: &str = "pg_dhis";

/// Default JDBC driver jar for the Doris catalog
pub const DEFAULT_DRIVER_FILENAME: &str = "postgresql.jar";

/// Default ClickHouse named collection holding the Postgres connection
pub const DEFAULT_NAMED_COLLECTION: &str = "pg_dhis";

// =============================================================================
// Doris Table Properties
// =============================================================================

/// Hash buckets per Doris table
pub const DORIS_BUCKETS: u32 = 10;

/// Replicas per Doris tablet
pub const DORIS_REPLICATION_NUM: u32 = 1;

// =============================================================================
// Aggregate Decimalization Defaults
// =============================================================================

pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;

pub const DEFAULT_DECIMAL_SCALE: u32 = 2;
