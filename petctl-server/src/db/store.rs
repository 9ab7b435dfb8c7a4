//! Storage seam used by the HTTP handlers
//!
//! Handlers only see `dyn PetStore`. `PgStore` backs production,
//! `MemoryStore` backs tests and `petctl serve --memory`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{NewOwner, Owner, OwnerFullName, Pet, PetDraft, PetLookup};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl StoreError {
    pub(crate) fn owner_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "owner",
            id: id.to_string(),
        }
    }

    pub(crate) fn pet_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "pet",
            id: id.to_string(),
        }
    }
}

/// Persistence operations for owners and pets.
///
/// Mutations take the clock reading from the caller so both timestamps of a
/// new row come from a single `now`.
#[async_trait]
pub trait PetStore: Send + Sync {
    /// All owners, ordered by id.
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError>;

    /// Insert an owner with `date_created == date_modified == now`.
    async fn create_owner(&self, owner: NewOwner, now: DateTime<Utc>) -> Result<Owner, StoreError>;

    /// Owners whose `date_created` falls on `date` (UTC), ordered by id.
    async fn owners_created_on(&self, date: NaiveDate) -> Result<Vec<Owner>, StoreError>;

    async fn get_owner(&self, id: i64) -> Result<Option<Owner>, StoreError>;

    /// Lowest-id owner whose "first last" name matches, ignoring case.
    async fn find_owner_by_full_name(
        &self,
        name: &OwnerFullName,
    ) -> Result<Option<Owner>, StoreError>;

    /// Pets referencing `owner_id`, ordered by id.
    async fn pets_for_owner(&self, owner_id: i64) -> Result<Vec<Pet>, StoreError>;

    /// Lowest-id pet matching the lookup key.
    async fn find_pet(&self, lookup: &PetLookup) -> Result<Option<Pet>, StoreError>;

    /// Insert a pet. Fails with `NotFound` (owner) when the owner is absent.
    async fn create_pet(&self, pet: PetDraft, now: DateTime<Utc>) -> Result<Pet, StoreError>;

    /// Replace name, owner and breed of pet `id` and refresh `date_modified`.
    ///
    /// The new owner is checked first, then the pet itself.
    async fn update_pet(
        &self,
        id: i64,
        pet: PetDraft,
        now: DateTime<Utc>,
    ) -> Result<Pet, StoreError>;

    /// Delete pet `id`. Fails with `NotFound` (pet) when no row matched.
    async fn delete_pet(&self, id: i64) -> Result<(), StoreError>;
}
