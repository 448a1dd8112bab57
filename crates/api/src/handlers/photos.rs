//! Handlers for the `/photos` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petal_core::error::CoreError;
use petal_db::entity::{Entity, NewDocument};
use petal_db::models::photo::{CreatePhoto, Photo, UpdatePhoto};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::CategoryParams;
use crate::response::{CreatedResponse, SuccessResponse};
use crate::state::AppState;

fn not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Photo::NAME,
        id,
    })
}

/// GET /api/photos?category=roses
///
/// List photo entries sorted by `order`, optionally for one category.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<impl IntoResponse> {
    let photos = state.photos.find_all(params.category.as_deref()).await?;
    Ok(Json(photos))
}

/// GET /api/photos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let photo = state
        .photos
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    Ok(Json(photo))
}

/// POST /api/photos
///
/// Create a photo entry. `title` and `category` are required.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePhoto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let id = state.photos.create(&input).await?;
    tracing::info!(photo_id = %id, category = ?input.category, "Photo created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// PUT /api/photos/{id}
///
/// Merge the supplied fields into an existing entry.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdatePhoto>,
) -> AppResult<impl IntoResponse> {
    let matched = state.photos.update(&id, &input).await?;
    if matched == 0 {
        return Err(not_found(id));
    }

    tracing::info!(photo_id = %id, "Photo updated");
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/photos/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.photos.delete(&id).await?;
    if deleted == 0 {
        return Err(not_found(id));
    }

    tracing::info!(photo_id = %id, "Photo deleted");
    Ok(Json(SuccessResponse::ok()))
}
