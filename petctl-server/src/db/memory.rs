//! In-process pet store
//!
//! Mirrors `PgStore` semantics over ordered maps. A single write lock covers
//! the owner check and the write, so mutations stay atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

use super::store::{PetStore, StoreError};
use crate::models::{NewOwner, Owner, OwnerFullName, Pet, PetDraft, PetLookup};

#[derive(Debug, Default)]
struct Tables {
    owners: BTreeMap<i64, Owner>,
    pets: BTreeMap<i64, Pet>,
    next_owner_id: i64,
    next_pet_id: i64,
}

impl Tables {
    fn ensure_owner(&self, owner_id: i64) -> Result<(), StoreError> {
        if self.owners.contains_key(&owner_id) {
            Ok(())
        } else {
            Err(StoreError::owner_not_found(owner_id))
        }
    }
}

/// Pet store kept entirely in memory. Data is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.owners.values().cloned().collect())
    }

    async fn create_owner(&self, owner: NewOwner, now: DateTime<Utc>) -> Result<Owner, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_owner_id += 1;
        let created = Owner {
            id: tables.next_owner_id,
            first_name: owner.first_name().to_owned(),
            last_name: owner.last_name().to_owned(),
            date_created: now,
            date_modified: now,
        };
        tables.owners.insert(created.id, created.clone());
        Ok(created)
    }

    async fn owners_created_on(&self, date: NaiveDate) -> Result<Vec<Owner>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .owners
            .values()
            .filter(|o| o.date_created.date_naive() == date)
            .cloned()
            .collect())
    }

    async fn get_owner(&self, id: i64) -> Result<Option<Owner>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.owners.get(&id).cloned())
    }

    async fn find_owner_by_full_name(
        &self,
        name: &OwnerFullName,
    ) -> Result<Option<Owner>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.owners.values().find(|o| name.matches(o)).cloned())
    }

    async fn pets_for_owner(&self, owner_id: i64) -> Result<Vec<Pet>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .pets
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_pet(&self, lookup: &PetLookup) -> Result<Option<Pet>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.pets.values().find(|p| lookup.matches(p)).cloned())
    }

    async fn create_pet(&self, pet: PetDraft, now: DateTime<Utc>) -> Result<Pet, StoreError> {
        let mut tables = self.tables.write().await;
        tables.ensure_owner(pet.owner_id())?;

        tables.next_pet_id += 1;
        let created = Pet {
            id: tables.next_pet_id,
            name: pet.name().to_owned(),
            owner_id: pet.owner_id(),
            breed: pet.breed().to_owned(),
            date_created: now,
            date_modified: now,
        };
        tables.pets.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_pet(
        &self,
        id: i64,
        pet: PetDraft,
        now: DateTime<Utc>,
    ) -> Result<Pet, StoreError> {
        let mut tables = self.tables.write().await;
        tables.ensure_owner(pet.owner_id())?;

        let existing = tables
            .pets
            .get_mut(&id)
            .ok_or_else(|| StoreError::pet_not_found(id))?;
        existing.name = pet.name().to_owned();
        existing.owner_id = pet.owner_id();
        existing.breed = pet.breed().to_owned();
        existing.date_modified = now.max(existing.date_created);
        Ok(existing.clone())
    }

    async fn delete_pet(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .pets
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::pet_not_found(id))
    }
}
