//! JDBC connection URL parsing
//!
//! Bridge dialects (ClickHouse reading Postgres tables, Doris mounting a Postgres
//! catalog) are configured from JDBC-style URLs such as
//! `jdbc:postgresql://localhost:5432/dhis2?ssl=true`. Only the pieces the SQL
//! builders need are extracted: host, port and database name. The authority
//! may carry user info (`user:secret@host`) or several hosts
//! (`db1:5432,db2/dhis2`); the first host is kept.

use crate::sql::SqlError;
use crate::utils::string::{non_blank, starts_with_ignore_ascii_case};

/// Scheme prefix of Postgres JDBC URLs
pub const POSTGRES_JDBC_SCHEME: &str = "jdbc:postgresql://";

/// Scheme prefix of ClickHouse JDBC URLs
pub const CLICKHOUSE_JDBC_SCHEME: &str = "jdbc:clickhouse://";

/// A validated JDBC URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdbcUrl {
    url: String,
    host: String,
    port: Option<u16>,
    database: Option<String>,
}

impl JdbcUrl {
    /// Parse and validate a URL that must start with `scheme`
    ///
    /// Surrounding whitespace is ignored and the scheme is matched without regard
    /// to ASCII case. A URL without a database segment is valid; its database
    /// name is `None`. A port which is empty or not a number is ignored.
    pub fn parse(url: &str, scheme: &str) -> Result<Self, SqlError> {
        let url = non_blank(Some(url))
            .ok_or_else(|| SqlError::invalid_url("connection URL must not be blank"))?;

        if !starts_with_ignore_ascii_case(url, scheme) {
            return Err(SqlError::invalid_url(format!(
                "connection URL must start with '{}': {}",
                scheme, url
            )));
        }

        let rest = &url[scheme.len()..];
        let rest = rest.split_once('?').map_or(rest, |(before, _)| before);
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let (host, port) = split_authority(authority);

        let database = path
            .trim_end_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);

        tracing::debug!(host, port, database = ?database, "Parsed JDBC URL");

        Ok(Self {
            url: url.to_string(),
            host: host.to_string(),
            port,
            database,
        })
    }

    /// Parse a `jdbc:postgresql://` URL
    pub fn postgres(url: &str) -> Result<Self, SqlError> {
        Self::parse(url, POSTGRES_JDBC_SCHEME)
    }

    /// Parse a `jdbc:clickhouse://` URL
    pub fn clickhouse(url: &str) -> Result<Self, SqlError> {
        Self::parse(url, CLICKHOUSE_JDBC_SCHEME)
    }

    /// The trimmed URL as given
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Database name from the first path segment, if any
    pub fn database_name(&self) -> Option<&str> {
        self.database.as_deref()
    }
}

/// First `host[:port]` of an authority, including bracketed IPv6 hosts
///
/// User info and additional hosts are skipped. The port is `None` when absent
/// or not a valid `u16`.
fn split_authority(authority: &str) -> (&str, Option<u16>) {
    let authority = authority.rsplit_once('@').map_or(authority, |(_, hosts)| hosts);
    let authority = authority.split(',').next().unwrap_or(authority);

    let (host, port) = if authority.starts_with('[') {
        match authority.find(']') {
            Some(end) => {
                let (host, tail) = authority.split_at(end + 1);
                (host, tail.strip_prefix(':'))
            }
            None => (authority, None),
        }
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    (host, port.and_then(|port| port.parse::<u16>().ok()))
}
