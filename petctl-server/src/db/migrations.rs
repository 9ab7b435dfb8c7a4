//! Schema setup for the owners and pets tables
//!
//! Every statement is idempotent, so this runs on each startup.

use sqlx::PgPool;

/// Create the owners and pets tables if they are absent
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running petctl migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS owners (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            date_created TIMESTAMPTZ NOT NULL,
            date_modified TIMESTAMPTZ NOT NULL,
            CHECK (date_created <= date_modified)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            owner_id BIGINT NOT NULL REFERENCES owners(id),
            breed TEXT NOT NULL,
            date_created TIMESTAMPTZ NOT NULL,
            date_modified TIMESTAMPTZ NOT NULL,
            CHECK (date_created <= date_modified)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pets_owner_id ON pets(owner_id)")
        .execute(pool)
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
