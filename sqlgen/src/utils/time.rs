//! Time utility functions

use chrono::{NaiveDateTime, Timelike};

use crate::sql::SqlError;
use crate::utils::string::non_blank;

/// ISO local date-time with optional fractional seconds
const ISO_LOCAL_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// ISO local date-time without seconds
const ISO_LOCAL_DATE_TIME_MINUTES: &str = "%Y-%m-%dT%H:%M";

/// Render an ISO local date-time as `yyyy-MM-dd HH:mm:ss.f`
///
/// The `T` separator becomes a space and trailing zeros of the fractional
/// seconds are dropped, keeping at least one digit:
///
/// ```text
/// 2023-10-20T15:30:45.400 -> 2023-10-20 15:30:45.4
/// 2023-10-20T15:30:45     -> 2023-10-20 15:30:45.0
/// 2023-10-20T15:30        -> 2023-10-20 15:30:00.0
/// ```
///
/// Absent or blank input yields `None`. Unparseable input is an error carrying
/// the chrono parse failure.
pub fn render_trimmed_timestamp(value: Option<&str>) -> Result<Option<String>, SqlError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };

    let timestamp = NaiveDateTime::parse_from_str(value, ISO_LOCAL_DATE_TIME)
        .or_else(|err| {
            NaiveDateTime::parse_from_str(value, ISO_LOCAL_DATE_TIME_MINUTES).map_err(|_| err)
        })
        .map_err(|source| SqlError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })?;

    Ok(Some(format!(
        "{}.{}",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        trim_fraction(timestamp.nanosecond())
    )))
}

/// Fractional seconds without trailing zeros, minimum one digit
fn trim_fraction(nanos: u32) -> String {
    let digits = format!("{:09}", nanos);
    match digits.trim_end_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
