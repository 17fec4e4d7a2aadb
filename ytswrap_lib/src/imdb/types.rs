//! Response types for the IMDb metadata API. Only the fields used for enrichment are modelled.

use serde::{Deserialize, Serialize};

/// A title document from `/titles/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub primary_title: Option<String>,
    #[serde(default)]
    pub directors: Vec<Person>,
    #[serde(default)]
    pub stars: Vec<Person>,
    #[serde(default)]
    pub plot: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Name id such as `nm0000206`.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub primary_image: Option<Image>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Person {
    pub fn image_url(&self) -> Option<&str> {
        self.primary_image.as_ref().map(|image| image.url.as_str())
    }
}
