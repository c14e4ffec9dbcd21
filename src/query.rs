//! Local prompt validation, run before any request leaves the process.

use crate::{Error, Result};

pub const MIN_QUERY_CHARS: usize = 10;

pub const EMPTY_QUERY_MESSAGE: &str = "Please describe the song you want to generate";
pub const SHORT_QUERY_MESSAGE: &str =
    "Please provide a more detailed description (at least 10 characters)";

/// Trim the raw prompt and reject it if it is empty or too short.
pub fn validate_query(raw: &str) -> Result<String> {
    let query = raw.trim();

    if query.is_empty() {
        return Err(Error::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }

    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(Error::Validation(SHORT_QUERY_MESSAGE.to_string()));
    }

    Ok(query.to_string())
}
