//! Custom Axum extractors
//!
//! Rejections become `ApiError::Validation` so every 400 shares the JSON error shape.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{positive_id, ValidationError};

/// Extract a strictly positive integer id from the path
pub struct PositiveId(pub i64);

impl<S> FromRequestParts<S> for PositiveId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id: i64 = raw.parse().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: format!("'{}' is not an integer", raw),
            })
        })?;

        Ok(Self(positive_id("id", id)?))
    }
}

/// Extract a `YYYY-MM-DD` calendar date from the path
pub struct ValidDate(pub NaiveDate);

impl<S> FromRequestParts<S> for ValidDate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "date" }))?;

        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "date",
                reason: format!("'{}' is not a YYYY-MM-DD date", raw),
            })
        })?;

        Ok(Self(date))
    }
}

/// JSON body whose parse failures are reported as validation errors
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "body",
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}
