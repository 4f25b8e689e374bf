//! Song entity model, request DTO, listing filter and response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use songbook_core::pagination::PageWindow;
use songbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A song row from the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Song {
    pub id: DbId,
    pub group_name: String,
    pub song_name: String,
    pub release_date: Timestamp,
    /// Lyrics; verses are separated by a blank line.
    pub text: String,
    pub link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /songs` and `PUT /songs/{id}`.
///
/// Every field defaults to an empty string. On update an empty field means
/// "leave unchanged"; on create `group` and `song` are required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SongRequest {
    #[validate(length(max = 255, message = "group name must be at most 255 characters"))]
    pub group: String,
    #[validate(length(max = 255, message = "song name must be at most 255 characters"))]
    pub song: String,
    pub text: String,
    #[validate(length(max = 2048, message = "link must be at most 2048 characters"))]
    pub link: String,
}

/// Insert payload built by the service from a validated [`SongRequest`].
#[derive(Debug, Clone)]
pub struct NewSong {
    pub group_name: String,
    pub song_name: String,
    pub release_date: Timestamp,
    pub text: String,
    pub link: String,
}

/// Filters and paging for the song listing.
///
/// String filters are case-insensitive substring matches; `None` or an
/// empty string leaves the column unconstrained. Date bounds are inclusive
/// whole days on `release_date`.
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub group_name: Option<String>,
    pub song_name: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// 1-based; non-positive means the first page.
    pub page: i64,
    /// Non-positive means the default page size.
    pub page_size: i64,
}

impl SongFilter {
    /// Inclusive lower bound on `release_date`: midnight UTC of `from_date`.
    pub fn released_from(&self) -> Option<Timestamp> {
        self.from_date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Exclusive upper bound on `release_date`: midnight UTC of the day
    /// after `to_date`, so the whole of `to_date` is included.
    pub fn released_before(&self) -> Option<Timestamp> {
        self.to_date
            .and_then(|d| d.succ_opt())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// One page of the song listing.
#[derive(Debug, Clone, Serialize)]
pub struct SongsResponse {
    /// Most recently created first.
    pub songs: Vec<Song>,
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl SongsResponse {
    pub fn new(songs: Vec<Song>, window: PageWindow) -> Self {
        Self {
            songs,
            page: window.page,
            page_size: window.page_size,
            total_items: window.total_items,
            total_pages: window.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn date_bounds_cover_whole_days() {
        let filter = SongFilter {
            from_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            to_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            ..Default::default()
        };
        assert_eq!(
            filter.released_from(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            filter.released_before(),
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unset_dates_are_unbounded() {
        let filter = SongFilter::default();
        assert_eq!(filter.released_from(), None);
        assert_eq!(filter.released_before(), None);
    }

    #[test]
    fn request_fields_default_to_empty() {
        let req: SongRequest = serde_json::from_str(r#"{"song": "X"}"#).unwrap();
        assert_eq!(req.song, "X");
        assert!(req.group.is_empty());
        assert!(req.text.is_empty());
        assert!(req.link.is_empty());
    }

    #[test]
    fn overlong_group_fails_validation() {
        let req = SongRequest {
            group: "g".repeat(256),
            song: "s".into(),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
