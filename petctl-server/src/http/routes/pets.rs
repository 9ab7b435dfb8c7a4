//! Pet endpoints under /pet
//!
//! Every write checks that the referenced owner exists before touching the
//! pets table; a missing owner is a 404, not a storage failure.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::db::StoreError;
use crate::http::error::ApiError;
use crate::http::extractors::{PositiveId, ValidJson};
use crate::http::server::AppState;
use crate::models::{OwnerFullName, Pet, PetDraft, PetLookup, ValidationError};

/// Create/update pet request
///
/// Missing fields fall back to empty/zero and fail validation with a 400.
#[derive(Debug, Deserialize)]
pub struct PetRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_id: i64,
    #[serde(default)]
    pub breed: String,
}

impl PetRequest {
    fn into_draft(self) -> Result<PetDraft, ValidationError> {
        PetDraft::new(&self.name, self.owner_id, &self.breed)
    }
}

/// Query for the pet-owner lookup
#[derive(Debug, Deserialize)]
pub struct PetOwnerParams {
    pub pet_id: Option<i64>,
    pub pet_name: Option<String>,
}

/// Create pet response
#[derive(Debug, Serialize)]
pub struct CreatedPetResponse {
    pub message: &'static str,
    pub pet: Pet,
}

/// GET /pet/get-pets/{owner_id} - pets of an owner, by owner id
async fn pets_by_owner_id(
    State(state): State<Arc<AppState>>,
    PositiveId(owner_id): PositiveId,
) -> Result<Json<Vec<Pet>>, ApiError> {
    state
        .store
        .get_owner(owner_id)
        .await?
        .ok_or_else(|| StoreError::owner_not_found(owner_id))?;

    let pets = state.store.pets_for_owner(owner_id).await?;
    Ok(Json(pets))
}

/// GET /pet/all-pets/{owner_name} - pets of an owner, by "first last" name
async fn pets_by_owner_name(
    State(state): State<Arc<AppState>>,
    Path(owner_name): Path<String>,
) -> Result<Json<Vec<Pet>>, ApiError> {
    let name = OwnerFullName::new(&owner_name)?;
    let owner = state
        .store
        .find_owner_by_full_name(&name)
        .await?
        .ok_or_else(|| StoreError::owner_not_found(name.as_str()))?;

    let pets = state.store.pets_for_owner(owner.id).await?;
    Ok(Json(pets))
}

/// GET /pet/pet-owner/?pet_id=&pet_name= - find a pet by id or by name
///
/// Returns the pet record itself; `pet_id` wins when both keys are given.
async fn find_pet(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PetOwnerParams>, QueryRejection>,
) -> Result<Json<Pet>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::Validation(ValidationError::InvalidFormat {
            field: "query",
            reason: rejection.body_text(),
        })
    })?;

    let lookup = PetLookup::from_params(params.pet_id, params.pet_name.as_deref())?;
    let pet = state.store.find_pet(&lookup).await?.ok_or_else(|| {
        let id = match &lookup {
            PetLookup::Id(id) => id.to_string(),
            PetLookup::Name(name) => name.clone(),
        };
        StoreError::pet_not_found(id)
    })?;

    Ok(Json(pet))
}

/// POST /pet/create-pet
async fn create_pet(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<PetRequest>,
) -> Result<(StatusCode, Json<CreatedPetResponse>), ApiError> {
    let draft = req.into_draft()?;
    let pet = state
        .store
        .create_pet(draft, Utc::now())
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(pet_id = pet.id, owner_id = pet.owner_id, "pet created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedPetResponse {
            message: "Pet created successfully",
            pet,
        }),
    ))
}

/// PUT /pet/update-pet/{pet_id} - full replace of name, owner and breed
async fn update_pet(
    State(state): State<Arc<AppState>>,
    PositiveId(pet_id): PositiveId,
    ValidJson(req): ValidJson<PetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let draft = req.into_draft()?;
    let pet = state
        .store
        .update_pet(pet_id, draft, Utc::now())
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(pet_id = pet.id, owner_id = pet.owner_id, "pet updated");
    Ok(Json(MessageResponse {
        message: "Pet updated successfully",
    }))
}

/// DELETE /pet/delete-pet/{pet_id}
async fn delete_pet(
    State(state): State<Arc<AppState>>,
    PositiveId(pet_id): PositiveId,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .delete_pet(pet_id)
        .await
        .map_err(ApiError::from_write)?;

    tracing::info!(pet_id, "pet deleted");
    Ok(Json(MessageResponse {
        message: "Pet deleted successfully",
    }))
}

/// Pet routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pet/get-pets/{owner_id}", get(pets_by_owner_id))
        .route("/pet/all-pets/{owner_name}", get(pets_by_owner_name))
        .route("/pet/pet-owner/", get(find_pet))
        .route("/pet/pet-owner", get(find_pet))
        .route("/pet/create-pet", post(create_pet))
        .route("/pet/update-pet/{pet_id}", put(update_pet))
        .route("/pet/delete-pet/{pet_id}", delete(delete_pet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, PetStore};
    use crate::models::NewOwner;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn app_with_owner(first: &str, last: &str) -> (Router, i64) {
        let store = MemoryStore::new();
        let owner = store
            .create_owner(NewOwner::new(first, last).unwrap(), Utc::now())
            .await
            .unwrap();
        let app = router().with_state(Arc::new(AppState::new(store)));
        (app, owner.id)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, name: &str, owner_id: i64) -> axum::response::Response {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/pet/create-pet",
                format!(r#"{{"name": "{name}", "owner_id": {owner_id}, "breed": "Lab"}}"#),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_pet_with_unknown_owner_is_404() {
        let (app, owner_id) = app_with_owner("Ann", "Lee").await;
        let response = create(&app, "Rex", owner_id + 100).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get_request(&format!("/pet/get-pets/{owner_id}")))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn create_pet_validates_payload() {
        let (app, owner_id) = app_with_owner("Ann", "Lee").await;
        for payload in [
            format!(r#"{{"name": "", "owner_id": {owner_id}, "breed": "Lab"}}"#),
            format!(r#"{{"name": "Rex", "owner_id": {owner_id}, "breed": ""}}"#),
            r#"{"name": "Rex", "owner_id": 0, "breed": "Lab"}"#.to_owned(),
            r#"{"name": "Rex", "breed": "Lab"}"#.to_owned(),
            r#"{"name": "Rex", "owner_id": "one", "breed": "Lab"}"#.to_owned(),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/pet/create-pet", payload.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
        }
    }

    #[tokio::test]
    async fn get_pets_rejects_bad_ids() {
        let (app, _) = app_with_owner("Ann", "Lee").await;
        for uri in ["/pet/get-pets/0", "/pet/get-pets/-4", "/pet/get-pets/abc"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }

        let response = app.oneshot(get_request("/pet/get-pets/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn all_pets_matches_name_case_insensitively() {
        let (app, owner_id) = app_with_owner("John", "Doe").await;
        assert_eq!(create(&app, "Rex", owner_id).await.status(), StatusCode::CREATED);

        for name in ["john%20doe", "John%20Doe", "JOHN%20DOE"] {
            let response = app
                .clone()
                .oneshot(get_request(&format!("/pet/all-pets/{name}")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", name);
            let body = json_body(response).await;
            assert_eq!(body[0]["name"], "Rex");
        }

        let response = app.oneshot(get_request("/pet/all-pets/Jane%20Doe")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn pet_owner_lookup() {
        let (app, owner_id) = app_with_owner("Ann", "Lee").await;
        let created = json_body(create(&app, "Rex", owner_id).await).await;
        let pet_id = created["pet"]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(get_request(&format!("/pet/pet-owner/?pet_id={pet_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "Rex");

        let response = app
            .clone()
            .oneshot(get_request("/pet/pet-owner/?pet_name=Rex"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["owner_id"], owner_id);

        // id takes precedence over name
        let response = app
            .clone()
            .oneshot(get_request(&format!("/pet/pet-owner?pet_id={}&pet_name=Rex", pet_id + 1)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(get_request("/pet/pet-owner/?pet_name=Fido"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn pet_owner_requires_a_key() {
        let (app, _) = app_with_owner("Ann", "Lee").await;
        for uri in ["/pet/pet-owner/", "/pet/pet-owner", "/pet/pet-owner/?pet_name="] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn update_pet_checks_owner_then_pet() {
        let (app, owner_id) = app_with_owner("Ann", "Lee").await;
        let created = json_body(create(&app, "Rex", owner_id).await).await;
        let pet_id = created["pet"]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/pet/update-pet/{pet_id}"),
                r#"{"name": "Max", "owner_id": 777, "breed": "Pug"}"#.to_owned(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(get_request(&format!("/pet/pet-owner/?pet_id={pet_id}")))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["name"], "Rex");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/pet/update-pet/9999",
                format!(r#"{{"name": "Max", "owner_id": {owner_id}, "breed": "Pug"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/pet/update-pet/{pet_id}"),
                format!(r#"{{"name": "Max", "owner_id": {owner_id}, "breed": "Pug"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "Pet updated successfully");

        let response = app
            .oneshot(get_request(&format!("/pet/pet-owner/?pet_id={pet_id}")))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["name"], "Max");
        assert_eq!(body["breed"], "Pug");
    }
}
