use url::Url;

use super::{common::append_pairs, Query};

/// Query for `movie_details.json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovieDetailsQuery {
    pub movie_id: u64,
    pub with_images: bool,
    pub with_cast: bool,
}

impl MovieDetailsQuery {
    /// Details for one movie, including images and cast.
    pub fn new(movie_id: u64) -> Self {
        Self {
            movie_id,
            with_images: true,
            with_cast: true,
        }
    }

    pub fn with_images(mut self, with_images: bool) -> Self {
        self.with_images = with_images;
        self
    }

    pub fn with_cast(mut self, with_cast: bool) -> Self {
        self.with_cast = with_cast;
        self
    }
}

impl Query for MovieDetailsQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        append_pairs(
            url,
            &[
                ("movie_id", self.movie_id.to_string()),
                ("with_images", self.with_images.to_string()),
                ("with_cast", self.with_cast.to_string()),
            ],
        )
    }
}

/// Query for `movie_suggestions.json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestionsQuery {
    pub movie_id: u64,
}

impl SuggestionsQuery {
    pub fn new(movie_id: u64) -> Self {
        Self { movie_id }
    }
}

impl Query for SuggestionsQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        append_pairs(url, &[("movie_id", self.movie_id.to_string())])
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_details_query() {
        let url = Url::parse("https://example.com/movie_details.json").unwrap();

        insta::assert_snapshot!(
            MovieDetailsQuery::new(10).add_to_url(&url).to_string(),
            @"https://example.com/movie_details.json?movie_id=10&with_images=true&with_cast=true"
        );

        insta::assert_snapshot!(
            MovieDetailsQuery::new(10)
                .with_cast(false)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/movie_details.json?movie_id=10&with_images=true&with_cast=false"
        );
    }

    #[test]
    fn test_suggestions_query() {
        let url = Url::parse("https://example.com/movie_suggestions.json").unwrap();
        insta::assert_snapshot!(
            SuggestionsQuery::new(42).add_to_url(&url).to_string(),
            @"https://example.com/movie_suggestions.json?movie_id=42"
        );
    }
}
