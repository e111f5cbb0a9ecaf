//! Title search helpers.
//!
//! A search term matches any title that contains it, ignoring case. The term
//! is matched literally: `%`, `_` and `\` carry no pattern meaning.

/// Turn a raw query value into a search term. Empty terms mean "no filter".
pub fn normalize_search_term(raw: Option<&str>) -> Option<&str> {
    raw.filter(|term| !term.is_empty())
}

/// Build an `ILIKE` pattern that matches `term` as a substring.
///
/// Must be used with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring test, the in-process equivalent of
/// [`like_pattern`].
pub fn title_matches(title: &str, term: &str) -> bool {
    title.to_lowercase().contains(&term.to_lowercase())
}
