//! Subsource API types.

use serde::{Deserialize, Serialize};

/// Response of `/movies/search`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MovieSearchResponse {
    #[serde(default)]
    pub data: Vec<MovieHit>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieHit {
    pub movie_id: SubsourceId,
    #[serde(default)]
    pub title: Option<String>,
}

/// Subsource ids arrive as numbers or strings depending on the endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SubsourceId {
    Numeric(i64),
    Text(String),
}

impl std::fmt::Display for SubsourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubsourceId::Numeric(id) => write!(f, "{}", id),
            SubsourceId::Text(id) => f.write_str(id),
        }
    }
}

/// A downloaded subtitle archive with the headers needed to relay it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDownload {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}
