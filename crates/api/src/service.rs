//! Song service: request validation, the create/update flows and lyrics
//! paging, on top of an injected [`SongStore`].
//!
//! Every call is independent. Uniqueness of `(group, song)` is enforced by
//! the store, not by any lock held here.

use std::sync::Arc;

use chrono::Utc;
use songbook_core::error::CoreError;
use songbook_core::lyrics::{paginate_lyrics, LyricsPage};
use songbook_core::song::{merge_field, validate_new_song};
use songbook_core::types::DbId;
use songbook_db::models::song::{NewSong, Song, SongFilter, SongRequest, SongsResponse};
use songbook_db::store::SongStore;
use validator::Validate;

#[derive(Clone)]
pub struct SongService {
    store: Arc<dyn SongStore>,
}

impl SongService {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        Self { store }
    }

    /// List songs matching `filter`, one page at a time.
    pub async fn get_songs(&self, filter: &SongFilter) -> Result<SongsResponse, CoreError> {
        tracing::info!(
            group = ?filter.group_name,
            song = ?filter.song_name,
            from_date = ?filter.from_date,
            to_date = ?filter.to_date,
            text = ?filter.text,
            link = ?filter.link,
            page = filter.page,
            page_size = filter.page_size,
            "Getting songs with filter"
        );
        validate_filter(filter)?;
        self.store.list(filter).await
    }

    pub async fn get_song(&self, id: DbId) -> Result<Song, CoreError> {
        tracing::info!(song_id = id, "Getting song");
        self.find_existing(id).await
    }

    /// Page through the verses of a song's lyrics.
    pub async fn get_lyrics(
        &self,
        id: DbId,
        page: i64,
        page_size: i64,
    ) -> Result<LyricsPage, CoreError> {
        tracing::info!(song_id = id, page, page_size, "Getting lyrics");
        let song = self.find_existing(id).await?;
        paginate_lyrics(&song.text, page, page_size)
    }

    /// Create a song released now. Both names are required.
    pub async fn create_song(&self, req: &SongRequest) -> Result<Song, CoreError> {
        tracing::info!(group = %req.group, song = %req.song, "Creating new song");
        validate_request(req)?;
        validate_new_song(&req.group, &req.song)?;

        let song = NewSong {
            group_name: req.group.clone(),
            song_name: req.song.clone(),
            release_date: Utc::now(),
            text: req.text.clone(),
            link: req.link.clone(),
        };
        let created = self.store.insert(&song).await?;
        tracing::info!(song_id = created.id, "Song created");
        Ok(created)
    }

    /// Apply the non-empty fields of `req` to song `id`.
    pub async fn update_song(&self, id: DbId, req: &SongRequest) -> Result<Song, CoreError> {
        tracing::info!(song_id = id, group = %req.group, song = %req.song, "Updating song");
        validate_request(req)?;

        let mut song = self.find_existing(id).await?;
        apply_request(&mut song, req);
        song.updated_at = Utc::now();

        self.store.update(&song).await
    }

    pub async fn delete_song(&self, id: DbId) -> Result<(), CoreError> {
        tracing::info!(song_id = id, "Deleting song");
        self.store.delete(id).await
    }

    async fn find_existing(&self, id: DbId) -> Result<Song, CoreError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Song", id })
    }
}

/// Hook for listing constraints. Every filter is currently acceptable:
/// out-of-range paging is coerced or rejected by the pagination rules.
fn validate_filter(_filter: &SongFilter) -> Result<(), CoreError> {
    Ok(())
}

fn validate_request(req: &SongRequest) -> Result<(), CoreError> {
    req.validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

/// Copy every non-empty request field onto `song`.
fn apply_request(song: &mut Song, req: &SongRequest) {
    merge_field(&mut song.group_name, &req.group);
    merge_field(&mut song.song_name, &req.song);
    merge_field(&mut song.text, &req.text);
    merge_field(&mut song.link, &req.link);
}
