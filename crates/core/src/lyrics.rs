//! Verse-based lyrics paging.
//!
//! A verse is a run of text between blank lines. Pages count verses, not
//! lines or characters, and a page is rejoined with the same blank-line
//! delimiter it was split on.

use serde::Serialize;

use crate::error::CoreError;
use crate::pagination::paginate;

/// Separator between verses: one blank line.
pub const VERSE_DELIMITER: &str = "\n\n";

/// One page of verses for the lyrics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricsPage {
    pub text: String,
    pub current_page: i64,
    pub total_pages: i64,
    pub page_size: i64,
}

/// Split lyrics into verses on [`VERSE_DELIMITER`].
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_DELIMITER).collect()
}

/// Return page `page` of the verses in `text`, `page_size` verses per page.
///
/// Empty text has no lyrics at all and fails with [`CoreError::Missing`].
/// Out-of-range pages fail with [`CoreError::PageNotFound`].
pub fn paginate_lyrics(text: &str, page: i64, page_size: i64) -> Result<LyricsPage, CoreError> {
    if text.is_empty() {
        return Err(CoreError::Missing("lyrics not found".to_string()));
    }

    let verses = split_verses(text);
    let window = paginate(verses.len() as i64, page, page_size)?;
    let (start, end) = window.bounds();

    Ok(LyricsPage {
        text: verses[start..end].join(VERSE_DELIMITER),
        current_page: window.page,
        total_pages: window.total_pages,
        page_size: window.page_size,
    })
}
