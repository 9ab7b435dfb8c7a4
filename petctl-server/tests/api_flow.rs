//! End-to-end walk through the HTTP surface over the in-memory store

use std::collections::BTreeSet;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use petctl_server::{build_router, AppState, MemoryStore, ServerConfig};

fn app() -> Router {
    build_router(AppState::new(MemoryStore::new()), &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn owner_and_pet_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/owner/create-owner",
        Some(json!({"first_name": "Ann", "last_name": "Lee"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let owner_id = body["owner"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/pet/create-pet",
        Some(json!({"name": "Rex", "owner_id": owner_id, "breed": "Lab"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Pet created successfully");
    let pet_id = body["pet"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/pet/get-pets/{owner_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let pets = body.as_array().unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0]["name"], "Rex");

    let (status, _) = send(&app, "DELETE", &format!("/pet/delete-pet/{pet_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/pet/get-pets/{owner_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "DELETE", &format!("/pet/delete-pet/{pet_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn owners_list_grows_with_unique_ids() {
    let app = app();

    for (first, last) in [("Ann", "Lee"), ("Bo", "Chan"), ("Cy", "Diaz")] {
        let (status, _) = send(
            &app,
            "POST",
            "/owner/create-owner",
            Some(json!({"first_name": first, "last_name": last})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/owner/owners", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: BTreeSet<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn pet_can_move_between_owners() {
    let app = app();

    let (_, first) = send(
        &app,
        "POST",
        "/owner/create-owner",
        Some(json!({"first_name": "Ann", "last_name": "Lee"})),
    )
    .await;
    let (_, second) = send(
        &app,
        "POST",
        "/owner/create-owner",
        Some(json!({"first_name": "Bo", "last_name": "Chan"})),
    )
    .await;
    let first_id = first["owner"]["id"].as_i64().unwrap();
    let second_id = second["owner"]["id"].as_i64().unwrap();

    let (_, created) = send(
        &app,
        "POST",
        "/pet/create-pet",
        Some(json!({"name": "Rex", "owner_id": first_id, "breed": "Lab"})),
    )
    .await;
    let pet_id = created["pet"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/pet/update-pet/{pet_id}"),
        Some(json!({"name": "Rex", "owner_id": second_id, "breed": "Lab"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/pet/all-pets/bo%20chan", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = send(&app, "GET", "/pet/all-pets/ANN%20LEE", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn pet_owner_without_keys_is_400() {
    let app = app();
    let (status, body) = send(&app, "GET", "/pet/pet-owner/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "please provide either pet_id or pet_name");
}
