//! Owner records and owner input validation

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::validation::required_text;
use super::ValidationError;

/// Owner record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Owner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Owner {
    /// `first_name + " " + last_name`, the key used by full-name lookups.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated input for creating an owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    first_name: String,
    last_name: String,
}

impl NewOwner {
    /// Validate both names: required, non-blank, trimmed.
    ///
    /// # Example
    /// ```
    /// use petctl_server::models::NewOwner;
    ///
    /// assert!(NewOwner::new("Ann", "Lee").is_ok());
    /// assert!(NewOwner::new("", "Lee").is_err());
    /// ```
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: required_text("first_name", first_name)?,
            last_name: required_text("last_name", last_name)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Case-insensitive "First Last" key for owner lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerFullName(String);

impl OwnerFullName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "owner_name" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against an owner's full name, ignoring case.
    ///
    /// Uses Unicode lowercasing. `PgStore` relies on Postgres `LOWER`, which
    /// agrees for non-ASCII names only under a Unicode-aware collation; under
    /// the `C` collation Postgres folds ASCII letters only.
    pub fn matches(&self, owner: &Owner) -> bool {
        owner.full_name().to_lowercase() == self.0.to_lowercase()
    }
}
