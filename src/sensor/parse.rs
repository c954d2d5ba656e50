//! Line grammar for the sensor protocol.
//!
//! ```text
//! temp:<decimal-number>
//! ```
//!
//! Anything not starting with `temp:` is ignored.

use std::num::ParseFloatError;

use thiserror::Error;

/// Literal prefix of a temperature line. Case-sensitive.
pub const TEMP_PREFIX: &str = "temp:";

/// A `temp:` line whose value could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no value after prefix in {line:?}")]
    MissingValue { line: String },

    #[error("invalid number {payload:?}: {source}")]
    InvalidNumber {
        payload: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parse one line from the device.
///
/// Returns `Ok(Some(value))` for a valid `temp:` line, `Ok(None)` for a line
/// that is not a temperature line, and `Err` for a `temp:` line with a bad
/// payload. The value is the second `:`-separated field, trimmed, so
/// `temp:1:2` reads as `1`.
pub fn parse_line(line: &str) -> Result<Option<f64>, ParseError> {
    if !line.starts_with(TEMP_PREFIX) {
        return Ok(None);
    }

    let payload = line.split(':').nth(1).unwrap_or_default().trim();
    if payload.is_empty() {
        return Err(ParseError::MissingValue {
            line: line.to_string(),
        });
    }

    payload
        .parse::<f64>()
        .map(Some)
        .map_err(|source| ParseError::InvalidNumber {
            payload: payload.to_string(),
            source,
        })
}
