//! Route definitions for photo gallery entries.

use axum::routing::get;
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Routes mounted at `/photos`.
///
/// ```text
/// GET    /       -> list (?category=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photos::list).post(photos::create))
        .route(
            "/{id}",
            get(photos::get_by_id)
                .put(photos::update)
                .delete(photos::delete),
        )
}
