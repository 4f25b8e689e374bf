use crate::service::SongService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: songbook_db::DbPool,
    /// Song operations over the injected store.
    pub songs: SongService,
}
