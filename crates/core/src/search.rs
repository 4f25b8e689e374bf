//! Filter helpers for the song listing query.
//!
//! Lives in `core` so both the repository and any in-memory store agree on
//! what an "unconstrained" filter value is.

/// Escape character used in generated `ILIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Treat an empty filter value the same as an absent one.
///
/// # Examples
///
/// ```
/// use songbook_core::search::active_term;
/// assert_eq!(active_term(&Some("queen".to_string())), Some("queen"));
/// assert_eq!(active_term(&Some(String::new())), None);
/// assert_eq!(active_term(&None), None);
/// ```
pub fn active_term(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `%`, `_` and the escape character itself are escaped so the user's input
/// matches literally.
///
/// # Examples
///
/// ```
/// use songbook_core::search::substring_pattern;
/// assert_eq!(substring_pattern("bohem"), "%bohem%");
/// assert_eq!(substring_pattern("100%"), "%100\\%%");
/// ```
pub fn substring_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_term_is_wrapped() {
        assert_eq!(substring_pattern("queen"), "%queen%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(substring_pattern("a_b"), "%a\\_b%");
        assert_eq!(substring_pattern("50%"), "%50\\%%");
    }

    #[test]
    fn escape_char_is_escaped() {
        assert_eq!(substring_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn empty_term_is_inactive() {
        assert_eq!(active_term(&Some(String::new())), None);
        assert_eq!(active_term(&Some("x".into())), Some("x"));
    }
}
