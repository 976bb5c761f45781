//! Identifier gate for SQL text interpolation
//!
//! Table and column names cannot be bound as parameters, so they are pasted
//! into the SQL text. Every such name must first become an `Identifier`;
//! nothing else in the crate accepts a raw string for interpolation.

use crate::error::{AggregateError, AggregateResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("static pattern"));

/// Destination tables additionally need at least three characters
static DESTINATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]{3,}$").expect("static pattern"));

/// A lowercase SQL identifier that passed the allow-list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub(super) String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> AggregateResult<Self> {
        let raw = raw.into();
        if raw.len() <= 63 && IDENTIFIER_PATTERN.is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(AggregateError::IdentifierInjectionRisk(raw))
        }
    }

    /// Validate a user-supplied destination table name
    pub fn destination(raw: &str) -> AggregateResult<Self> {
        if !DESTINATION_PATTERN.is_match(raw) {
            return Err(AggregateError::InvalidConfiguration(format!(
                "destination table {:?} must be at least 3 characters of a-z, 0-9 or _",
                raw
            )));
        }
        Self::new(raw)
    }

    /// Append a suffix (e.g. a release year) and re-validate the result
    pub fn with_suffix(&self, suffix: impl fmt::Display) -> AggregateResult<Self> {
        Self::new(format!("{}{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
