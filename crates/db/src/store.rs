//! Storage interface consumed by the song service.
//!
//! [`SongStore`] speaks in [`CoreError`] so the service never sees sqlx
//! types. [`PgSongStore`] is the PostgreSQL implementation on top of
//! [`SongRepo`]; tests substitute an in-memory store.

use async_trait::async_trait;
use songbook_core::error::CoreError;
use songbook_core::pagination::paginate;
use songbook_core::song::NO_SONG_ID;
use songbook_core::types::DbId;

use crate::models::song::{NewSong, Song, SongFilter, SongsResponse};
use crate::repositories::song_repo::{is_unique_violation, SongRepo};
use crate::DbPool;

/// Message used whenever a `(group, song)` pair is already taken.
pub const ALREADY_EXISTS_MESSAGE: &str = "song already exists";

#[async_trait]
pub trait SongStore: Send + Sync {
    /// Existence gate: is `(group_name, song_name)` used by a song other
    /// than `excluded_id`?
    async fn exists(
        &self,
        group_name: &str,
        song_name: &str,
        excluded_id: DbId,
    ) -> Result<bool, CoreError>;

    /// Number of songs matching `filter`.
    async fn count(&self, filter: &SongFilter) -> Result<i64, CoreError>;

    /// Songs matching `filter`, newest first, `limit` rows from `offset`.
    async fn find_page(
        &self,
        filter: &SongFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Song>, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Song>, CoreError>;

    /// Insert a song. Fails with [`CoreError::AlreadyExists`] if the name
    /// pair is taken.
    async fn insert(&self, song: &NewSong) -> Result<Song, CoreError>;

    /// Persist `song` over the stored row with the same id. Fails with
    /// [`CoreError::NotFound`] if the row is gone and
    /// [`CoreError::AlreadyExists`] if another song has the new name pair.
    async fn update(&self, song: &Song) -> Result<Song, CoreError>;

    /// Fails with [`CoreError::NotFound`] if nothing was deleted.
    async fn delete(&self, id: DbId) -> Result<(), CoreError>;

    /// Count, resolve the requested page, then fetch it.
    ///
    /// A page past the end fails with [`CoreError::PageNotFound`] before
    /// the page query runs.
    async fn list(&self, filter: &SongFilter) -> Result<SongsResponse, CoreError> {
        let total_items = self.count(filter).await?;
        let window = paginate(total_items, filter.page, filter.page_size)?;
        let songs = self
            .find_page(filter, window.limit(), window.offset())
            .await?;
        Ok(SongsResponse::new(songs, window))
    }
}

/// [`SongStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgSongStore {
    pool: DbPool,
}

impl PgSongStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongStore for PgSongStore {
    async fn exists(
        &self,
        group_name: &str,
        song_name: &str,
        excluded_id: DbId,
    ) -> Result<bool, CoreError> {
        SongRepo::exists(&self.pool, group_name, song_name, excluded_id)
            .await
            .map_err(|e| internal("failed to check song existence", e))
    }

    async fn count(&self, filter: &SongFilter) -> Result<i64, CoreError> {
        SongRepo::count(&self.pool, filter)
            .await
            .map_err(|e| internal("failed to count songs", e))
    }

    async fn find_page(
        &self,
        filter: &SongFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Song>, CoreError> {
        SongRepo::find_page(&self.pool, filter, limit, offset)
            .await
            .map_err(|e| internal("failed to query songs", e))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Song>, CoreError> {
        SongRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| internal("failed to get song", e))
    }

    async fn insert(&self, song: &NewSong) -> Result<Song, CoreError> {
        if self
            .exists(&song.group_name, &song.song_name, NO_SONG_ID)
            .await?
        {
            return Err(already_exists());
        }
        SongRepo::create(&self.pool, song)
            .await
            .map_err(|e| write_error("failed to insert song", e))?
            .ok_or_else(already_exists)
    }

    async fn update(&self, song: &Song) -> Result<Song, CoreError> {
        if self
            .exists(&song.group_name, &song.song_name, song.id)
            .await?
        {
            return Err(already_exists());
        }
        SongRepo::update(&self.pool, song)
            .await
            .map_err(|e| write_error("failed to update song", e))?
            .ok_or(CoreError::NotFound {
                entity: "Song",
                id: song.id,
            })
    }

    async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        let deleted = SongRepo::delete(&self.pool, id)
            .await
            .map_err(|e| internal("failed to delete song", e))?;
        if deleted {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: "Song", id })
        }
    }
}

fn already_exists() -> CoreError {
    CoreError::AlreadyExists(ALREADY_EXISTS_MESSAGE.to_string())
}

/// Wrap a storage failure as [`CoreError::Internal`], logging the cause.
fn internal(context: &str, err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "{context}");
    CoreError::Internal(format!("{context}: {err}"))
}

/// Like [`internal`], except a name-pair constraint violation becomes
/// [`CoreError::AlreadyExists`].
fn write_error(context: &str, err: sqlx::Error) -> CoreError {
    if is_unique_violation(&err) {
        tracing::debug!(error = %err, "unique constraint rejected write");
        return already_exists();
    }
    internal(context, err)
}
