//! Data models for recipes at each stage of the pipeline

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A recipe card found on a listing page. `link` is absent when the card's
/// title carried no anchor; such a summary is carried forward but cannot be
/// fetched for detail extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
}

/// A recipe after detail extraction. Core fields are fixed; everything the
/// page names itself (time label, tag labels, nutrition labels) lands in
/// `attributes`, keyed by the label text found on the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// Always present, possibly empty. Order and duplicates preserved.
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl RecipeRecord {
    pub fn from_summary(summary: &RecipeSummary) -> Self {
        Self {
            title: summary.title.clone(),
            link: summary.link.clone(),
            image_url: summary.image_url.clone(),
            ..Self::default()
        }
    }
}

/// The fixed schema served to the filter view. `total_time_minutes` is absent
/// when no recognizable duration was found on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecipe {
    pub title: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub description: String,
    pub total_time_minutes: Option<u32>,
    pub cuisine: Vec<String>,
    pub course: Vec<String>,
    pub normalised_ingredients: Vec<String>,
}
