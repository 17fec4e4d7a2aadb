use std::collections::BTreeMap;
use std::str::FromStr;

use url::Url;

use super::{
    common::{append_pairs, QueryCommon, SortDirection},
    PagedQuery, Query,
};

/// Query for `list_movies.json`.
///
/// Besides pagination and the search term, every filter is a plain key/value
/// pair forwarded verbatim. The typed builders below cover the filters the API
/// documents; [`MovieListQuery::with_filter`] forwards anything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieListQuery {
    pub common: QueryCommon,
    pub query_term: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Query for MovieListQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        let common = self.common.pairs();
        for (key, value) in common.iter() {
            pairs.push((*key, value.as_str()));
        }
        if let Some(query_term) = &self.query_term {
            pairs.push(("query_term", query_term.as_str()));
        }
        for (key, value) in self.filters.iter() {
            pairs.push((key.as_str(), value.as_str()));
        }
        append_pairs(url, &pairs)
    }
}

impl PagedQuery for MovieListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl MovieListQuery {
    pub fn with_query_term(mut self, query_term: &str) -> Self {
        self.query_term = Some(query_term.to_string());
        self
    }

    pub fn with_quality(self, quality: Quality) -> Self {
        self.with_filter("quality", &quality.to_string())
    }

    pub fn with_genre(self, genre: &str) -> Self {
        self.with_filter("genre", genre)
    }

    /// Minimum IMDb rating, 0-9.
    pub fn with_minimum_rating(self, rating: u8) -> Self {
        self.with_filter("minimum_rating", &rating.min(9).to_string())
    }

    pub fn with_sort_by(self, sort_by: SortBy) -> Self {
        self.with_filter("sort_by", &sort_by.to_string())
    }

    pub fn with_order_by(self, direction: SortDirection) -> Self {
        self.with_filter("order_by", &direction.to_string())
    }

    /// Forwards an arbitrary parameter. A later call with the same key wins.
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.insert(key.to_string(), value.to_string());
        self
    }
}

/// Release quality filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    P480,
    P720,
    P1080,
    P1080X265,
    P2160,
    ThreeD,
}

impl Quality {
    pub const ALL: [Quality; 6] = [
        Quality::P480,
        Quality::P720,
        Quality::P1080,
        Quality::P1080X265,
        Quality::P2160,
        Quality::ThreeD,
    ];
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Quality::P480 => "480p",
            Quality::P720 => "720p",
            Quality::P1080 => "1080p",
            Quality::P1080X265 => "1080p.x265",
            Quality::P2160 => "2160p",
            Quality::ThreeD => "3D",
        })
    }
}

impl FromStr for Quality {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "480p" => Ok(Quality::P480),
            "720p" => Ok(Quality::P720),
            "1080p" => Ok(Quality::P1080),
            "1080p.x265" => Ok(Quality::P1080X265),
            "2160p" => Ok(Quality::P2160),
            "3D" | "3d" => Ok(Quality::ThreeD),
            _ => Err(()),
        }
    }
}

/// Sort field for the listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    Title,
    Year,
    Rating,
    Peers,
    Seeds,
    DownloadCount,
    LikeCount,
    #[default]
    DateAdded,
}

impl SortBy {
    pub const ALL: [SortBy; 8] = [
        SortBy::DateAdded,
        SortBy::Title,
        SortBy::Year,
        SortBy::Rating,
        SortBy::Peers,
        SortBy::Seeds,
        SortBy::DownloadCount,
        SortBy::LikeCount,
    ];
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortBy::Title => "title",
            SortBy::Year => "year",
            SortBy::Rating => "rating",
            SortBy::Peers => "peers",
            SortBy::Seeds => "seeds",
            SortBy::DownloadCount => "download_count",
            SortBy::LikeCount => "like_count",
            SortBy::DateAdded => "date_added",
        })
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortBy::Title),
            "year" => Ok(SortBy::Year),
            "rating" => Ok(SortBy::Rating),
            "peers" => Ok(SortBy::Peers),
            "seeds" => Ok(SortBy::Seeds),
            "download_count" => Ok(SortBy::DownloadCount),
            "like_count" => Ok(SortBy::LikeCount),
            "date_added" => Ok(SortBy::DateAdded),
            _ => Err(()),
        }
    }
}
