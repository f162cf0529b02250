//! User records - validation and row types
//!
//! Email shape: letters/digits/`._-` before `@`, letters/digits/`.-` after,
//! and a 2-4 letter suffix.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ValidationError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$").expect("invalid email regex")
});

/// Stored user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Validated user submission, ready to insert.
///
/// Only obtainable through [`NewUser::new`], so every insert carries
/// a non-empty name and a well-formed email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Validate a candidate `(name, email)` pair.
    ///
    /// # Rules
    /// - name and email must be non-empty (name is checked first)
    /// - email must match the basic `local@domain.tld` pattern
    ///
    /// Values pass through unchanged: no trimming, no case-folding.
    ///
    /// # Example
    /// ```
    /// use userbook_server::models::NewUser;
    ///
    /// assert!(NewUser::new("Alice", "alice@example.com").is_ok());
    /// assert!(NewUser::new("", "alice@example.com").is_err());
    /// assert!(NewUser::new("Alice", "alice@example").is_err());
    /// ```
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();

        if name.is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        if email.is_empty() {
            return Err(ValidationError::MissingField { field: "email" });
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(ValidationError::InvalidEmailFormat);
        }

        Ok(Self { name, email })
    }

    /// Validate fields that may be absent from the request body.
    pub fn from_parts(
        name: Option<String>,
        email: Option<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(name.unwrap_or_default(), email.unwrap_or_default())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach a store-assigned id.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
