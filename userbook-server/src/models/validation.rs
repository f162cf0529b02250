//! Validation error types

use std::fmt;

/// Validation error for submitted user records
///
/// The `Display` output is the exact text returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or absent
    MissingField { field: &'static str },

    /// Email doesn't match `local@domain.tld`
    InvalidEmailFormat,
}

impl ValidationError {
    /// Name of the offending field, for logging.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::InvalidEmailFormat => "email",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { .. } => f.write_str("Name and email are required"),
            Self::InvalidEmailFormat => f.write_str("Invalid email format"),
        }
    }
}

impl std::error::Error for ValidationError {}
