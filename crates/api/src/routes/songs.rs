//! Route definitions for the `/songs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::songs;
use crate::state::AppState;

/// Routes mounted at `/songs`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/lyrics     -> lyrics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(songs::list).post(songs::create))
        .route(
            "/{id}",
            get(songs::get_by_id)
                .put(songs::update)
                .delete(songs::delete),
        )
        .route("/{id}/lyrics", get(songs::lyrics))
}
