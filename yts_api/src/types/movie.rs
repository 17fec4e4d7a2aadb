//! Movie listing types.
//!
//! Listing entries are kept as raw JSON objects: only the identity and release
//! year are ever inspected, and everything else is handed back to callers as-is.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One page of `list_movies.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MovieList {
    /// Catalogue-wide number of matches, not the size of this page.
    #[serde(default, deserialize_with = "lenient_count")]
    pub movie_count: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: u32,

    #[serde(default, deserialize_with = "lenient_count")]
    pub page_number: u32,

    /// Omitted by the API when the page is empty.
    #[serde(default)]
    pub movies: Option<Vec<ListingItem>>,
}

/// Reads a count sent as a number, a numeric string, or null. Anything
/// unreadable becomes 0 so the page's `movies` are still usable.
fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(parsed.and_then(|n| T::try_from(n).ok()).unwrap_or_default())
}

impl MovieList {
    /// Consumes the page, returning its entries (empty when absent).
    pub fn into_movies(self) -> Vec<ListingItem> {
        self.movies.unwrap_or_default()
    }
}

/// A movie entry in a listing. Serializes back to exactly the object it was read from.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ListingItem(Map<String, Value>);

impl ListingItem {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Catalogue identity, if the entry carries a usable `id`.
    pub fn id(&self) -> Option<MovieId> {
        match self.0.get("id")? {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => MovieId::Numeric(i),
                None => MovieId::Text(n.to_string()),
            }),
            Value::String(s) => Some(MovieId::Text(s.clone())),
            _ => None,
        }
    }

    /// Release year, with absent, null or unparsable values read as 0.
    pub fn year(&self) -> i64 {
        match self.0.get("year") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Read-only access to every field of the entry.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ListingItem {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Identity of a catalogue entry. `1` and `"1"` are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovieId {
    Numeric(i64),
    Text(String),
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Numeric(id) => write!(f, "{}", id),
            MovieId::Text(id) => f.write_str(id),
        }
    }
}
