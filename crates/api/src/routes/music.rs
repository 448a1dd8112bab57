//! Route definitions for music tracks.

use axum::routing::get;
use axum::Router;

use crate::handlers::music;
use crate::state::AppState;

/// Routes mounted at `/music`.
///
/// ```text
/// GET  /       -> list (?category=)
/// POST /       -> create
/// GET  /{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(music::list).post(music::create))
        .route("/{id}", get(music::get_by_id))
}
