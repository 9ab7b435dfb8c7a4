//! Owner endpoints under /owner

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidDate, ValidJson};
use crate::http::server::AppState;
use crate::models::{NewOwner, Owner};

/// Create owner request
///
/// Missing fields deserialize as empty and fail validation with a 400.
#[derive(Debug, Deserialize)]
pub struct CreateOwnerRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Create owner response
#[derive(Debug, Serialize)]
pub struct CreatedOwnerResponse {
    pub message: &'static str,
    pub owner: Owner,
}

/// GET /owner/owners - every owner; an empty table is an empty list
async fn list_owners(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Owner>>, ApiError> {
    let owners = state.store.list_owners().await?;
    Ok(Json(owners))
}

/// POST /owner/create-owner
async fn create_owner(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateOwnerRequest>,
) -> Result<(StatusCode, Json<CreatedOwnerResponse>), ApiError> {
    let new_owner = NewOwner::new(&req.first_name, &req.last_name)?;
    let owner = state
        .store
        .create_owner(new_owner, Utc::now())
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(owner_id = owner.id, "owner created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedOwnerResponse {
            message: "Owner created successfully",
            owner,
        }),
    ))
}

/// GET /owner/find-owner/{date_created} - owners created on a UTC calendar date
async fn find_owners_by_date(
    State(state): State<Arc<AppState>>,
    ValidDate(date): ValidDate,
) -> Result<Json<Vec<Owner>>, ApiError> {
    let owners = state.store.owners_created_on(date).await?;
    Ok(Json(owners))
}

/// Owner routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/owner/owners", get(list_owners))
        .route("/owner/create-owner", post(create_owner))
        .route("/owner/find-owner/{date_created}", get(find_owners_by_date))
}
