//! Handlers for the `/music` resource.
//!
//! Tracks can be listed, fetched and created; there is no update or
//! delete endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petal_core::error::CoreError;
use petal_db::entity::{Entity, NewDocument};
use petal_db::models::music::{CreateMusicTrack, MusicTrack};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::CategoryParams;
use crate::response::CreatedResponse;
use crate::state::AppState;

/// GET /api/music?category=calm
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<impl IntoResponse> {
    let tracks = state.music.find_all(params.category.as_deref()).await?;
    Ok(Json(tracks))
}

/// GET /api/music/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let track = state.music.find_by_id(&id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: MusicTrack::NAME,
            id: id.clone(),
        })
    })?;
    Ok(Json(track))
}

/// POST /api/music
///
/// Create a track. `title` and `filename` are required.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMusicTrack>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let id = state.music.create(&input).await?;
    tracing::info!(track_id = %id, filename = ?input.filename, "Music track created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}
