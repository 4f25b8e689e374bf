//! Field rules for song create and update requests.

use crate::error::CoreError;

/// Sentinel id passed to the existence check on create. No stored song
/// has id 0 because ids start at 1.
pub const NO_SONG_ID: i64 = 0;

/// A new song needs both a song name and a group name.
pub fn validate_new_song(group_name: &str, song_name: &str) -> Result<(), CoreError> {
    if song_name.is_empty() {
        return Err(CoreError::Validation(
            "song name cannot be empty".to_string(),
        ));
    }
    if group_name.is_empty() {
        return Err(CoreError::Validation(
            "group name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Overwrite `current` with `incoming` unless `incoming` is empty.
pub fn merge_field(current: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        incoming.clone_into(current);
    }
}
