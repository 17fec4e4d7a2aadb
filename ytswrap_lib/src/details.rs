//! Movie details enrichment with crew and plot from the IMDb metadata API.

use serde_json::Value;

use crate::imdb::types::{Person, Title};

/// A crew or cast member as exposed on an enriched details document.
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    pub name: String,
    pub image: Option<String>,
    pub id: String,
}

impl From<&Person> for Credit {
    fn from(person: &Person) -> Self {
        Self {
            name: person.display_name.clone(),
            image: person.image_url().map(str::to_string),
            id: person.id.clone(),
        }
    }
}

/// The `imdb_code` of the movie inside a `movie_details.json` body, if present.
pub fn imdb_code(details: &Value) -> Option<&str> {
    details["data"]["movie"]["imdb_code"]
        .as_str()
        .filter(|code| !code.is_empty())
}

/// Adds `directors`, `director`, `actors` and `plot_summary` to the movie object.
///
/// Fields the title does not provide are left untouched, so an existing value
/// from the details document survives.
pub fn enrich_with_title(details: &mut Value, title: &Title) {
    let Some(movie) = details
        .get_mut("data")
        .and_then(|data| data.get_mut("movie"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    if !title.directors.is_empty() {
        let credits: Vec<Credit> = title.directors.iter().map(Credit::from).collect();
        let names = title
            .directors
            .iter()
            .map(|d| d.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        movie.insert("directors".to_string(), credits_value(&credits));
        movie.insert("director".to_string(), Value::String(names));
    }

    if !title.stars.is_empty() {
        let credits: Vec<Credit> = title.stars.iter().map(Credit::from).collect();
        movie.insert("actors".to_string(), credits_value(&credits));
    }

    if let Some(plot) = title.plot.as_deref().filter(|p| !p.is_empty()) {
        movie.insert("plot_summary".to_string(), Value::String(plot.to_string()));
    }
}

fn credits_value(credits: &[Credit]) -> Value {
    Value::Array(
        credits
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "image": c.image,
                    "id": c.id,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::imdb::types::Image;

    fn person(id: &str, name: &str, image: Option<&str>) -> Person {
        Person {
            id: id.to_string(),
            display_name: name.to_string(),
            primary_image: image.map(|url| Image {
                url: url.to_string(),
                width: None,
                height: None,
            }),
        }
    }

    #[test]
    fn finds_imdb_code() {
        let details = json!({"data": {"movie": {"imdb_code": "tt0133093"}}});
        assert_eq!(imdb_code(&details), Some("tt0133093"));
        assert_eq!(imdb_code(&json!({"data": {"movie": {"imdb_code": ""}}})), None);
        assert_eq!(imdb_code(&json!({"status": "error"})), None);
    }

    #[test]
    fn adds_crew_and_plot() {
        let mut details = json!({"data": {"movie": {"id": 1, "title": "The Matrix"}}});
        let title = Title {
            directors: vec![
                person("nm0905154", "Lana Wachowski", Some("https://img/lana.jpg")),
                person("nm0905152", "Lilly Wachowski", None),
            ],
            stars: vec![person("nm0000206", "Keanu Reeves", Some("https://img/keanu.jpg"))],
            plot: Some("A hacker learns the truth.".to_string()),
            ..Title::default()
        };

        enrich_with_title(&mut details, &title);

        let movie = &details["data"]["movie"];
        assert_eq!(movie["title"], "The Matrix");
        assert_eq!(movie["director"], "Lana Wachowski, Lilly Wachowski");
        assert_eq!(
            movie["directors"],
            json!([
                {"name": "Lana Wachowski", "image": "https://img/lana.jpg", "id": "nm0905154"},
                {"name": "Lilly Wachowski", "image": null, "id": "nm0905152"}
            ])
        );
        assert_eq!(movie["actors"][0]["name"], "Keanu Reeves");
        assert_eq!(movie["plot_summary"], "A hacker learns the truth.");
    }

    #[test]
    fn empty_title_changes_nothing() {
        let mut details = json!({"data": {"movie": {"id": 1}}});
        let before = details.clone();
        enrich_with_title(&mut details, &Title::default());
        assert_eq!(details, before);
    }

    #[test]
    fn missing_movie_object_is_ignored() {
        let mut details = json!({"status": "error", "data": []});
        enrich_with_title(&mut details, &Title::default());
        assert_eq!(details, json!({"status": "error", "data": []}));
    }
}
