//! Sequential prefixed identifiers: `<PREFIX>_<NNNN>`.
//!
//! The numeric part is zero-padded to at least four digits and widens past
//! `9999` instead of wrapping. Callers must serialise allocate-then-insert per
//! table; see `repository::postgres` for how the database backend does it.

use regex::Regex;
use thiserror::Error;

pub const SEPARATOR: char = '_';
pub const MIN_DIGITS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("'{0}' is not of the form <PREFIX>_<NUMBER>")]
    Shape(String),
    #[error("'{id}' has prefix '{found}', expected '{expected}'")]
    PrefixMismatch {
        id: String,
        found: String,
        expected: String,
    },
    #[error("'{0}' has a non-numeric suffix")]
    Suffix(String),
    #[error("sequence exhausted after '{0}'")]
    Exhausted(String),
}

/// Next identifier after `current_max`, or the seed `<prefix>_0001` when the table is empty.
pub fn allocate_next(prefix: &str, current_max: Option<&str>) -> Result<String, IdentifierError> {
    let Some(max) = current_max else {
        return Ok(format_identifier(prefix, 1));
    };
    let n = parse_identifier(prefix, max)?;
    let next = n
        .checked_add(1)
        .ok_or_else(|| IdentifierError::Exhausted(max.to_string()))?;
    Ok(format_identifier(prefix, next))
}

/// Numeric suffix of `id`, checking that it carries `prefix`.
pub fn parse_identifier(prefix: &str, id: &str) -> Result<u64, IdentifierError> {
    let mut parts = id.split(SEPARATOR);
    let (Some(found), Some(digits), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(IdentifierError::Shape(id.to_string()));
    };
    if found != prefix {
        return Err(IdentifierError::PrefixMismatch {
            id: id.to_string(),
            found: found.to_string(),
            expected: prefix.to_string(),
        });
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdentifierError::Suffix(id.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| IdentifierError::Suffix(id.to_string()))
}

pub fn format_identifier(prefix: &str, n: u64) -> String {
    format!("{}{}{:0width$}", prefix, SEPARATOR, n, width = MIN_DIGITS)
}

/// Regex matching every well-formed identifier for `prefix`.
pub fn identifier_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^{}{}\d{{{},}}$",
        regex::escape(prefix),
        SEPARATOR,
        MIN_DIGITS
    ))
}
