//! Pet records, pet payload validation, and pet lookup keys

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::validation::{positive_id, required_text};
use super::ValidationError;

/// Pet record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub breed: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

/// Validated pet payload, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    name: String,
    owner_id: i64,
    breed: String,
}

impl PetDraft {
    pub fn new(name: &str, owner_id: i64, breed: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            owner_id: positive_id("owner_id", owner_id)?,
            breed: required_text("breed", breed)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }
}

/// How a single pet is looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetLookup {
    Id(i64),
    Name(String),
}

impl PetLookup {
    /// Pick a lookup key from optional query values.
    ///
    /// `pet_id` wins when both are present. A blank `pet_name` counts as absent.
    pub fn from_params(pet_id: Option<i64>, pet_name: Option<&str>) -> Result<Self, ValidationError> {
        if let Some(id) = pet_id {
            return Ok(Self::Id(id));
        }
        match pet_name {
            Some(name) if !name.trim().is_empty() => Ok(Self::Name(name.to_owned())),
            _ => Err(ValidationError::MissingKey {
                fields: &["pet_id", "pet_name"],
            }),
        }
    }

    pub fn matches(&self, pet: &Pet) -> bool {
        match self {
            Self::Id(id) => pet.id == *id,
            Self::Name(name) => pet.name == *name,
        }
    }
}
