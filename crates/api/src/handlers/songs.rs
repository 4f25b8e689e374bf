//! Handlers for the `/songs` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use songbook_core::lyrics::LyricsPage;
use songbook_core::types::DbId;
use songbook_db::models::song::{Song, SongRequest, SongsResponse};

use crate::error::{AppError, AppResult};
use crate::query::{PageParams, SongListParams};
use crate::state::AppState;

/// GET /api/v1/songs
///
/// Filtered, paginated listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<SongListParams>, QueryRejection>,
) -> AppResult<Json<SongsResponse>> {
    tracing::debug!("Handling list songs request");
    let filter = query_params(params)?.into_filter()?;
    let response = state.songs.get_songs(&filter).await?;
    Ok(Json(response))
}

/// GET /api/v1/songs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Song>> {
    let id = song_id(id)?;
    let song = state.songs.get_song(id).await?;
    Ok(Json(song))
}

/// GET /api/v1/songs/{id}/lyrics
///
/// One page of verses. 404 if the song is missing, has no lyrics, or the
/// page is out of range.
pub async fn lyrics(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Json<LyricsPage>> {
    tracing::debug!("Handling lyrics request");
    let id = song_id(id)?;
    let (page, page_size) = query_params(params)?.parse()?;
    let lyrics = state.songs.get_lyrics(id, page, page_size).await?;
    Ok(Json(lyrics))
}

/// POST /api/v1/songs
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<SongRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Song>)> {
    tracing::debug!("Handling create song request");
    let input = request_body(body)?;
    let song = state.songs.create_song(&input).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/v1/songs/{id}
///
/// Empty or missing fields in the body leave the stored value unchanged.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    body: Result<Json<SongRequest>, JsonRejection>,
) -> AppResult<Json<Song>> {
    tracing::debug!("Handling update song request");
    let id = song_id(id)?;
    let input = request_body(body)?;
    let song = state.songs.update_song(id, &input).await?;
    Ok(Json(song))
}

/// DELETE /api/v1/songs/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    tracing::debug!("Handling delete song request");
    let id = song_id(id)?;
    state.songs.delete_song(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Private helpers ──────────────────────────────────────────────────────

fn song_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("Invalid song ID".to_string()))
}

fn request_body(body: Result<Json<SongRequest>, JsonRejection>) -> AppResult<SongRequest> {
    body.map(|Json(input)| input)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {}", e.body_text())))
}
