//! Shared query parameter types for API handlers.
//!
//! Parameters arrive as raw strings so that an empty value (`?page=`) can
//! be treated as absent and a malformed one reported with the parameter's
//! name, instead of the generic extractor rejection.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use songbook_db::models::song::SongFilter;

use crate::error::{AppError, AppResult};

/// Date format accepted by `from_date` / `to_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Page parameters (`?page=&page_size=`). Missing values become `0`, which
/// the pagination rules coerce to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageParams {
    /// Parse into `(page, page_size)`.
    pub fn parse(&self) -> AppResult<(i64, i64)> {
        let page = parse_optional::<i64>(self.page.as_deref(), "page")?.unwrap_or(0);
        let page_size =
            parse_optional::<i64>(self.page_size.as_deref(), "page size")?.unwrap_or(0);
        Ok((page, page_size))
    }
}

/// Query parameters for `GET /songs`.
#[derive(Debug, Default, Deserialize)]
pub struct SongListParams {
    pub group_name: Option<String>,
    pub song_name: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    #[serde(flatten)]
    pub paging: PageParams,
}

impl SongListParams {
    /// Validate and convert into a repository filter.
    pub fn into_filter(self) -> AppResult<SongFilter> {
        let (page, page_size) = self.paging.parse()?;
        Ok(SongFilter {
            from_date: parse_date(self.from_date.as_deref(), "from_date")?,
            to_date: parse_date(self.to_date.as_deref(), "to_date")?,
            group_name: self.group_name,
            song_name: self.song_name,
            text: self.text,
            link: self.link,
            page,
            page_size,
        })
    }
}

/// Parse an optional parameter, treating an empty string as absent.
fn parse_optional<T: FromStr>(raw: Option<&str>, name: &str) -> AppResult<Option<T>> {
    match raw.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {name}: '{v}'"))),
    }
}

fn parse_date(raw: Option<&str>, name: &str) -> AppResult<Option<NaiveDate>> {
    match raw.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                AppError::BadRequest(format!("Invalid {name} format, expected YYYY-MM-DD"))
            }),
    }
}
