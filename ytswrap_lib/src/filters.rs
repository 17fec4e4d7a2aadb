//! Static catalogue of the filter values the listing accepts, for building filter menus.

use chrono::Datelike;
use serde::Serialize;
use yts_api::{Quality, SortBy, SortDirection};

use crate::listing::YEAR_RANGE_SENTINEL;

pub const GENRES: &[&str] = &[
    "action",
    "adventure",
    "animation",
    "biography",
    "comedy",
    "crime",
    "documentary",
    "drama",
    "family",
    "fantasy",
    "film-noir",
    "history",
    "horror",
    "music",
    "musical",
    "mystery",
    "romance",
    "sci-fi",
    "sport",
    "thriller",
    "war",
    "western",
];

/// First year listed individually; everything older is covered by the range option.
const FIRST_LISTED_YEAR: i32 = 2001;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FilterCatalogue {
    pub quality: Vec<FilterOption>,
    pub genre: Vec<FilterOption>,
    pub minimum_rating: Vec<FilterOption>,
    pub sort_by: Vec<FilterOption>,
    pub order_by: Vec<FilterOption>,
    pub year: Vec<FilterOption>,
}

impl FilterCatalogue {
    /// Catalogue with years listed up to the current calendar year (UTC).
    pub fn current() -> Self {
        Self::for_year(chrono::Utc::now().year())
    }

    pub fn for_year(current_year: i32) -> Self {
        let all = || FilterOption::new("all", "All");

        let quality = std::iter::once(all())
            .chain(
                Quality::ALL
                    .iter()
                    .map(|q| FilterOption::new(q.to_string(), q.to_string())),
            )
            .collect();

        let genre = std::iter::once(all())
            .chain(GENRES.iter().map(|g| FilterOption::new(*g, title_case(g))))
            .collect();

        let minimum_rating = std::iter::once(FilterOption::new("0", "All Ratings"))
            .chain(
                (1..=9)
                    .rev()
                    .map(|r| FilterOption::new(r.to_string(), format!("{}+", r))),
            )
            .collect();

        let sort_by = SortBy::ALL
            .iter()
            .map(|s| FilterOption::new(s.to_string(), title_case(&s.to_string())))
            .collect();

        let order_by = SortDirection::ALL
            .iter()
            .map(|d| {
                let label = match d {
                    SortDirection::Desc => "Descending",
                    SortDirection::Asc => "Ascending",
                };
                FilterOption::new(d.to_string(), label)
            })
            .collect();

        let year = std::iter::once(FilterOption::new("all", "All Years"))
            .chain(
                (FIRST_LISTED_YEAR..=current_year.max(FIRST_LISTED_YEAR))
                    .rev()
                    .map(|y| FilterOption::new(y.to_string(), y.to_string())),
            )
            .chain(std::iter::once(FilterOption::new(
                YEAR_RANGE_SENTINEL,
                "2000 and less",
            )))
            .collect();

        Self {
            quality,
            genre,
            minimum_rating,
            sort_by,
            order_by,
            year,
        }
    }
}

/// `"film-noir"` -> `"Film-Noir"`, `"date_added"` -> `"Date Added"`.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut upper = true;
    for c in value.chars() {
        if c == '_' {
            out.push(' ');
            upper = true;
        } else if c == '-' {
            out.push(c);
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_run_newest_first_then_range() {
        let catalogue = FilterCatalogue::for_year(2004);
        let values: Vec<&str> = catalogue.year.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["all", "2004", "2003", "2002", "2001", "2000_and_less"]
        );
    }

    #[test]
    fn ratings_descend() {
        let catalogue = FilterCatalogue::for_year(2025);
        assert_eq!(catalogue.minimum_rating.len(), 10);
        assert_eq!(catalogue.minimum_rating[1].value, "9");
        assert_eq!(catalogue.minimum_rating[1].label, "9+");
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(title_case("film-noir"), "Film-Noir");
        assert_eq!(title_case("date_added"), "Date Added");
        assert_eq!(title_case("sci-fi"), "Sci-Fi");
    }

    #[test]
    fn qualities_include_all() {
        let catalogue = FilterCatalogue::for_year(2025);
        assert_eq!(catalogue.quality[0].value, "all");
        assert!(catalogue.quality.iter().any(|q| q.value == "1080p.x265"));
    }
}
