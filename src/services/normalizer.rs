use regex::Regex;
use std::sync::OnceLock;

use crate::constants::address::{MAX_LENGTH, MIN_LENGTH};
use crate::models::SearchQuery;
use crate::services::LookupError;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern defined in code"))
}

/// Trims, enforces the length bounds, then collapses whitespace runs.
///
/// The bounds apply to the trimmed input before collapsing, and length is
/// counted in characters, not bytes, so Cyrillic input gets the same limits
/// as Latin input.
pub fn normalize(raw: &str) -> Result<SearchQuery, LookupError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if length < MIN_LENGTH {
        return Err(LookupError::Validation(format!(
            "Адрес должен содержать не менее {MIN_LENGTH} символов"
        )));
    }

    if length > MAX_LENGTH {
        return Err(LookupError::Validation(format!(
            "Адрес должен содержать не более {MAX_LENGTH} символов"
        )));
    }

    let collapsed = whitespace_run().replace_all(trimmed, " ");
    Ok(SearchQuery::new_unchecked(collapsed.into_owned()))
}
