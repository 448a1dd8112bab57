pub mod health;
pub mod music;
pub mod photos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /photos              list, create
/// /photos/{id}         get, update, delete
///
/// /music               list, create
/// /music/{id}          get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/photos", photos::router())
        .nest("/music", music::router())
}
