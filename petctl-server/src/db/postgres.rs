//! PostgreSQL-backed pet store
//!
//! - Reads use the pool directly
//! - Each mutation runs in one transaction; an early return drops it and rolls back
//! - Owner existence is checked inside that transaction, before the write

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};

use super::store::{PetStore, StoreError};
use crate::models::{NewOwner, Owner, OwnerFullName, Pet, PetDraft, PetLookup};

const OWNER_COLUMNS: &str = "id, first_name, last_name, date_created, date_modified";
const PET_COLUMNS: &str = "id, name, owner_id, breed, date_created, date_modified";

/// Pet store over a shared PgPool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Fail with `NotFound` unless the owner row exists.
async fn ensure_owner(conn: &mut PgConnection, owner_id: i64) -> Result<(), StoreError> {
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM owners WHERE id = $1)")
        .bind(owner_id)
        .fetch_one(conn)
        .await?;

    if exists.0 {
        Ok(())
    } else {
        Err(StoreError::owner_not_found(owner_id))
    }
}

#[async_trait]
impl PetStore for PgStore {
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        let owners = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(owners)
    }

    async fn create_owner(&self, owner: NewOwner, now: DateTime<Utc>) -> Result<Owner, StoreError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Owner>(&format!(
            r#"
            INSERT INTO owners (first_name, last_name, date_created, date_modified)
            VALUES ($1, $2, $3, $3)
            RETURNING {OWNER_COLUMNS}
            "#
        ))
        .bind(owner.first_name())
        .bind(owner.last_name())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn owners_created_on(&self, date: NaiveDate) -> Result<Vec<Owner>, StoreError> {
        let owners = sqlx::query_as::<_, Owner>(&format!(
            r#"
            SELECT {OWNER_COLUMNS}
            FROM owners
            WHERE (date_created AT TIME ZONE 'UTC')::date = $1
            ORDER BY id
            "#
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(owners)
    }

    async fn get_owner(&self, id: i64) -> Result<Option<Owner>, StoreError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner)
    }

    async fn find_owner_by_full_name(
        &self,
        name: &OwnerFullName,
    ) -> Result<Option<Owner>, StoreError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            r#"
            SELECT {OWNER_COLUMNS}
            FROM owners
            WHERE LOWER(first_name || ' ' || last_name) = LOWER($1)
            ORDER BY id
            LIMIT 1
            "#
        ))
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner)
    }

    async fn pets_for_owner(&self, owner_id: i64) -> Result<Vec<Pet>, StoreError> {
        let pets = sqlx::query_as::<_, Pet>(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pets)
    }

    async fn find_pet(&self, lookup: &PetLookup) -> Result<Option<Pet>, StoreError> {
        let pet = match lookup {
            PetLookup::Id(id) => {
                sqlx::query_as::<_, Pet>(&format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1"))
                    .bind(*id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            PetLookup::Name(name) => {
                sqlx::query_as::<_, Pet>(&format!(
                    "SELECT {PET_COLUMNS} FROM pets WHERE name = $1 ORDER BY id LIMIT 1"
                ))
                .bind(name.as_str())
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(pet)
    }

    async fn create_pet(&self, pet: PetDraft, now: DateTime<Utc>) -> Result<Pet, StoreError> {
        let mut tx = self.pool.begin().await?;

        ensure_owner(&mut tx, pet.owner_id()).await?;

        let created = sqlx::query_as::<_, Pet>(&format!(
            r#"
            INSERT INTO pets (name, owner_id, breed, date_created, date_modified)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(pet.name())
        .bind(pet.owner_id())
        .bind(pet.breed())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn update_pet(
        &self,
        id: i64,
        pet: PetDraft,
        now: DateTime<Utc>,
    ) -> Result<Pet, StoreError> {
        let mut tx = self.pool.begin().await?;

        ensure_owner(&mut tx, pet.owner_id()).await?;

        // GREATEST keeps date_created <= date_modified if the clock steps back
        let updated = sqlx::query_as::<_, Pet>(&format!(
            r#"
            UPDATE pets
            SET name = $2,
                owner_id = $3,
                breed = $4,
                date_modified = GREATEST(date_created, $5)
            WHERE id = $1
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(pet.name())
        .bind(pet.owner_id())
        .bind(pet.breed())
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::pet_not_found(id))?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_pet(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::pet_not_found(id));
        }

        tx.commit().await?;
        Ok(())
    }
}
