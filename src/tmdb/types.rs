use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One catalog entry, as returned by the discover and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
}

/// Ordered movies exactly as the upstream returned them.
pub type DisplayList = Vec<MovieRecord>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub page: u32,
    pub results: DisplayList,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// The search term captured from the form at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SearchQuery {
    fn from(term: String) -> Self {
        Self(term)
    }
}

impl From<&str> for SearchQuery {
    fn from(term: &str) -> Self {
        Self(term.to_string())
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
