//! Repository for the `songs` table.

use sqlx::PgPool;
use songbook_core::search::{active_term, substring_pattern};
use songbook_core::types::{DbId, Timestamp};

use crate::models::song::{NewSong, Song, SongFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, group_name, song_name, release_date, text, link, created_at, updated_at";

/// Unique constraint on `(group_name, song_name)`.
pub const UNIQUE_GROUP_SONG: &str = "uq_songs_group_name_song_name";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Provides CRUD and filtered listing for songs.
pub struct SongRepo;

impl SongRepo {
    /// Whether a song other than `excluded_id` already uses this
    /// `(group_name, song_name)` pair. Pass `0` to check against all songs.
    pub async fn exists(
        pool: &PgPool,
        group_name: &str,
        song_name: &str,
        excluded_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM songs
                WHERE group_name = $1 AND song_name = $2 AND id <> $3
             )",
        )
        .bind(group_name)
        .bind(song_name)
        .bind(excluded_id)
        .fetch_one(pool)
        .await
    }

    /// Count songs matching `filter`. Paging fields are ignored.
    pub async fn count(pool: &PgPool, filter: &SongFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, values) = filter_clause(filter);
        let query = format!("SELECT COUNT(*) FROM songs{where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in values {
            q = match value {
                FilterValue::Pattern(p) => q.bind(p),
                FilterValue::Time(t) => q.bind(t),
            };
        }
        q.fetch_one(pool).await
    }

    /// Fetch one page of songs matching `filter`, newest first.
    ///
    /// Uses the same predicates as [`SongRepo::count`]; only ordering,
    /// limit and offset are added.
    pub async fn find_page(
        pool: &PgPool,
        filter: &SongFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Song>, sqlx::Error> {
        let (where_clause, values) = filter_clause(filter);
        let limit_idx = values.len() + 1;
        let query = format!(
            "SELECT {COLUMNS} FROM songs{where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            offset_idx = limit_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Song>(&query);
        for value in values {
            q = match value {
                FilterValue::Pattern(p) => q.bind(p),
                FilterValue::Time(t) => q.bind(t),
            };
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Find a song by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Song>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM songs WHERE id = $1");
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new song, returning the created row.
    ///
    /// Returns `None` when the `(group_name, song_name)` pair is already
    /// taken, including by a concurrent insert that won the race.
    pub async fn create(pool: &PgPool, input: &NewSong) -> Result<Option<Song>, sqlx::Error> {
        let query = format!(
            "INSERT INTO songs (group_name, song_name, release_date, text, link)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT {UNIQUE_GROUP_SONG} DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(&input.group_name)
            .bind(&input.song_name)
            .bind(input.release_date)
            .bind(&input.text)
            .bind(&input.link)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every mutable column of `song.id` with the values in `song`.
    ///
    /// Returns `None` if no row with that id exists. A clash with another
    /// song's name pair surfaces as a unique violation (see
    /// [`is_unique_violation`]).
    pub async fn update(pool: &PgPool, song: &Song) -> Result<Option<Song>, sqlx::Error> {
        let query = format!(
            "UPDATE songs SET
                group_name = $2,
                song_name = $3,
                release_date = $4,
                text = $5,
                link = $6,
                updated_at = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(song.id)
            .bind(&song.group_name)
            .bind(&song.song_name)
            .bind(song.release_date)
            .bind(&song.text)
            .bind(&song.link)
            .bind(song.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a song by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Whether `err` is a violation of the `(group_name, song_name)` constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(UNIQUE_GROUP_SONG)
        }
        _ => false,
    }
}

/// A bind value of the dynamic `WHERE` clause.
enum FilterValue {
    Pattern(String),
    Time(Timestamp),
}

/// Build the `WHERE` clause for `filter` and its bind values in placeholder
/// order, starting at `$1`. Shared by the count and page queries so both see
/// exactly the same rows. An empty filter yields an empty clause.
fn filter_clause(filter: &SongFilter) -> (String, Vec<FilterValue>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    let substring_filters = [
        ("group_name", &filter.group_name),
        ("song_name", &filter.song_name),
        ("text", &filter.text),
        ("link", &filter.link),
    ];
    for (column, value) in substring_filters {
        if let Some(term) = active_term(value) {
            values.push(FilterValue::Pattern(substring_pattern(term)));
            conditions.push(format!("{column} ILIKE ${} ESCAPE '\\'", values.len()));
        }
    }

    if let Some(from) = filter.released_from() {
        values.push(FilterValue::Time(from));
        conditions.push(format!("release_date >= ${}", values.len()));
    }
    if let Some(before) = filter.released_before() {
        values.push(FilterValue::Time(before));
        conditions.push(format!("release_date < ${}", values.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    (where_clause, values)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn where_sql(filter: &SongFilter) -> String {
        filter_clause(filter).0
    }

    #[test]
    fn empty_filter_is_unconstrained() {
        let (clause, values) = filter_clause(&SongFilter::default());
        assert_eq!(clause, "");
        assert!(values.is_empty());
    }

    #[test]
    fn empty_strings_are_ignored() {
        let filter = SongFilter {
            group_name: Some(String::new()),
            link: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(where_sql(&filter), "");
    }

    #[test]
    fn each_active_field_gets_a_placeholder() {
        let filter = SongFilter {
            group_name: Some("queen".into()),
            text: Some("galileo".into()),
            from_date: NaiveDate::from_ymd_opt(1975, 1, 1),
            to_date: NaiveDate::from_ymd_opt(1975, 12, 31),
            ..Default::default()
        };
        let (clause, values) = filter_clause(&filter);
        assert_eq!(
            clause,
            " WHERE group_name ILIKE $1 ESCAPE '\\' \
             AND text ILIKE $2 ESCAPE '\\' \
             AND release_date >= $3 \
             AND release_date < $4"
        );
        assert_eq!(values.len(), 4);
        assert!(matches!(&values[0], FilterValue::Pattern(p) if p == "%queen%"));
    }
}
