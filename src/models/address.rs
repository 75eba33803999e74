use serde::Serialize;
use std::fmt;

/// A user-entered address after normalization.
///
/// Only [`crate::services::normalizer::normalize`] constructs one, so holding a
/// `SearchQuery` means the length bounds already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub(crate) const fn new_unchecked(normalized: String) -> Self {
        Self(normalized)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
