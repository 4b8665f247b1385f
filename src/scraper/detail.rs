//! Per-recipe detail extraction.
//!
//! Fetches each summary's detail page, rejects pages that fail the
//! recipe-exists check, and pulls the structured fields. Every field is
//! optional and extracted independently; a malformed field is omitted
//! without affecting its siblings.

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use super::{Scraper, parse_selector};
use crate::config::{ConfigError, SiteConfig};
use crate::models::{RecipeRecord, RecipeSummary};

// Inner markup of the tag/ingredient/nutrition blocks is WordPress Recipe
// Maker output and identical across the source blogs, so these stay fixed
// while the outer containers come from SiteConfig.
const TAG_CONTAINER: &str = ".wprm-recipe-tag-container";
const TAG_LABEL: &str = ".wprm-recipe-tag-label";
const TAG_VALUE: &str = ".wprm-block-text-normal";
const INGREDIENT_NAME: &str = ".wprm-recipe-ingredient-name";
const NUTRITION_LABEL: &str = ".wprm-nutrition-label-text-nutrition-label";
const NUTRITION_VALUE: &str = ".wprm-nutrition-label-text-nutrition-value";
const NUTRITION_UNIT: &str = ".wprm-nutrition-label-text-nutrition-unit";

/// Compiled detail selectors, parsed once per site before any fetch.
pub(crate) struct DetailSelectors {
    title: Selector,
    description: Selector,
    time: Selector,
    tags: Selector,
    tag_container: Selector,
    tag_label: Selector,
    tag_value: Selector,
    ingredients: Selector,
    ingredient_name: Selector,
    nutrition: Selector,
    nutrition_label: Selector,
    nutrition_value: Selector,
    nutrition_unit: Selector,
    instructions: Selector,
    exists: Option<(Selector, Option<String>)>,
}

impl DetailSelectors {
    pub(crate) fn compile(config: &SiteConfig) -> Result<Self, ConfigError> {
        let exists = match &config.detail.exists {
            Some(check) => Some((
                parse_selector(&check.selector)?,
                check.expected_text.clone(),
            )),
            None => None,
        };

        Ok(Self {
            title: parse_selector(&config.detail.title)?,
            description: parse_selector(&config.detail.description)?,
            time: parse_selector(&config.detail.time)?,
            tags: parse_selector(&config.detail.tags)?,
            tag_container: parse_selector(TAG_CONTAINER)?,
            tag_label: parse_selector(TAG_LABEL)?,
            tag_value: parse_selector(TAG_VALUE)?,
            ingredients: parse_selector(&config.detail.ingredients)?,
            ingredient_name: parse_selector(INGREDIENT_NAME)?,
            nutrition: parse_selector(&config.detail.nutrition)?,
            nutrition_label: parse_selector(NUTRITION_LABEL)?,
            nutrition_value: parse_selector(NUTRITION_VALUE)?,
            nutrition_unit: parse_selector(NUTRITION_UNIT)?,
            instructions: parse_selector(&config.detail.instructions)?,
            exists,
        })
    }
}

impl Scraper {
    /// Fetch each summary's detail page in order and extract one record per
    /// page that passes validation. Summaries without a link, failed
    /// fetches, and pages failing the recipe-exists check are skipped.
    pub async fn extract_details(
        &self,
        summaries: &[RecipeSummary],
        config: &SiteConfig,
    ) -> Result<Vec<RecipeRecord>> {
        let selectors = DetailSelectors::compile(config)?;
        let mut records = Vec::new();

        for (index, summary) in summaries.iter().enumerate() {
            let Some(link) = summary.link.as_deref() else {
                warn!("Skipping {:?}: card had no link", summary.title);
                continue;
            };

            info!("Progress: {}/{}, URL: {}", index + 1, summaries.len(), link);

            let Some(body) = self.fetch(link, config).await else {
                continue;
            };

            let document = Html::parse_document(&body);
            if let Some(record) = extract_detail(&document, &selectors, summary) {
                records.push(record);
            }
        }

        info!(
            "Extracted {} of {} recipes from {}",
            records.len(),
            summaries.len(),
            config.name
        );
        Ok(records)
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract one record from a parsed detail page. Returns `None` when the
/// page fails the recipe-exists check (not a genuine recipe page).
pub(crate) fn extract_detail(
    document: &Html,
    selectors: &DetailSelectors,
    summary: &RecipeSummary,
) -> Option<RecipeRecord> {
    if let Some((exists_selector, expected_text)) = &selectors.exists {
        let marker = document.select(exists_selector).next()?;
        if let Some(expected) = expected_text
            && trimmed_text(marker) != *expected
        {
            return None;
        }
    }

    let mut record = RecipeRecord::from_summary(summary);

    if let Some(title) = document.select(&selectors.title).next() {
        record.title = trimmed_text(title);
    }

    if let Some(description) = document.select(&selectors.description).next() {
        record.description = Some(trimmed_text(description));
    }

    // "Total Time 45 minutes" -> label "Total Time", value "45 minutes".
    // Shorter text means the duration is missing and the field is dropped.
    if let Some(time) = document.select(&selectors.time).next() {
        let text = trimmed_text(time);
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() >= 4 {
            record
                .attributes
                .insert(tokens[0..2].join(" "), tokens[2..4].join(" "));
        }
    }

    if let Some(tags) = document.select(&selectors.tags).next() {
        for container in tags.select(&selectors.tag_container) {
            let label = container.select(&selectors.tag_label).next();
            let value = container.select(&selectors.tag_value).next();
            if let (Some(label), Some(value)) = (label, value) {
                record
                    .attributes
                    .insert(trimmed_text(label), trimmed_text(value));
            }
        }
    }

    for item in document.select(&selectors.ingredients) {
        if let Some(name) = item.select(&selectors.ingredient_name).next() {
            record.ingredients.push(trimmed_text(name));
        }
    }

    for item in document.select(&selectors.nutrition) {
        let label = item.select(&selectors.nutrition_label).next();
        let value = item.select(&selectors.nutrition_value).next();
        let unit = item.select(&selectors.nutrition_unit).next();
        if let (Some(label), Some(value), Some(unit)) = (label, value, unit) {
            record.attributes.insert(
                trimmed_text(label),
                format!("{} {}", trimmed_text(value), trimmed_text(unit)),
            );
        }
    }

    if let Some(instructions) = document.select(&selectors.instructions).next() {
        record.instructions = Some(trimmed_text(instructions));
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DetailSelectors as DetailSelectorConfig, ExistsCheck, ListingSelectors, Pagination,
    };

    fn detail_config(exists: Option<ExistsCheck>) -> SiteConfig {
        SiteConfig {
            name: "fixture".to_string(),
            listing_url: "https://example.com/page/{}/".to_string(),
            pagination: Pagination::Pages(1),
            headers: Vec::new(),
            listing: ListingSelectors {
                card: "article".to_string(),
                title: "h2".to_string(),
                image: "img".to_string(),
                image_attr: "src".to_string(),
            },
            detail: DetailSelectorConfig {
                title: "h2.wprm-recipe-name".to_string(),
                description: "div.wprm-recipe-summary".to_string(),
                time: "div.wprm-recipe-total-time-container".to_string(),
                tags: "div.wprm-recipe-tags-container".to_string(),
                ingredients: "li.wprm-recipe-ingredient".to_string(),
                nutrition: "span.wprm-nutrition-label-text-nutrition-container".to_string(),
                instructions: "div.wprm-recipe-instructions-container".to_string(),
                exists,
            },
            database_url: "sqlite:data/fixture_recipes.db".to_string(),
        }
    }

    fn summary() -> RecipeSummary {
        RecipeSummary {
            title: "Card title".to_string(),
            link: Some("https://example.com/pad-thai/".to_string()),
            image_url: Some("https://example.com/pad-thai.jpg".to_string()),
        }
    }

    const DETAIL_PAGE: &str = r##"
        <html><body>
          <a class="wprm-recipe-jump" href="#recipe">Jump to Recipe</a>
          <h2 class="wprm-recipe-name">Authentic Pad Thai</h2>
          <div class="wprm-recipe-summary">Street-style noodles.</div>
          <div class="wprm-recipe-total-time-container">Total Time 45 minutes</div>
          <div class="wprm-recipe-tags-container">
            <span class="wprm-recipe-tag-container">
              <span class="wprm-recipe-tag-label">Course</span>
              <span class="wprm-block-text-normal">Main Course</span>
            </span>
            <span class="wprm-recipe-tag-container">
              <span class="wprm-recipe-tag-label">Cuisine</span>
              <span class="wprm-block-text-normal">Thai</span>
            </span>
            <span class="wprm-recipe-tag-container">
              <span class="wprm-recipe-tag-label">Orphan</span>
            </span>
          </div>
          <ul>
            <li class="wprm-recipe-ingredient">
              <span class="wprm-recipe-ingredient-amount">200</span>
              <span class="wprm-recipe-ingredient-name">rice noodles</span>
            </li>
            <li class="wprm-recipe-ingredient">
              <span class="wprm-recipe-ingredient-name">2 eggs</span>
            </li>
            <li class="wprm-recipe-ingredient">
              <span class="wprm-recipe-ingredient-amount">no name here</span>
            </li>
          </ul>
          <span class="wprm-nutrition-label-text-nutrition-container">
            <span class="wprm-nutrition-label-text-nutrition-label">Calories</span>
            <span class="wprm-nutrition-label-text-nutrition-value">450</span>
            <span class="wprm-nutrition-label-text-nutrition-unit">kcal</span>
          </span>
          <span class="wprm-nutrition-label-text-nutrition-container">
            <span class="wprm-nutrition-label-text-nutrition-label">Sodium</span>
            <span class="wprm-nutrition-label-text-nutrition-value">800</span>
          </span>
          <div class="wprm-recipe-instructions-container">Soak noodles. Fry everything.</div>
        </body></html>
    "##;

    #[test]
    fn extracts_all_fields_from_a_valid_recipe_page() {
        let config = detail_config(Some(ExistsCheck {
            selector: "a.wprm-recipe-jump".to_string(),
            expected_text: None,
        }));
        let selectors = DetailSelectors::compile(&config).unwrap();
        let document = Html::parse_document(DETAIL_PAGE);

        let record = extract_detail(&document, &selectors, &summary()).unwrap();

        // Detail title overwrites the card title
        assert_eq!(record.title, "Authentic Pad Thai");
        assert_eq!(record.link.as_deref(), Some("https://example.com/pad-thai/"));
        assert_eq!(record.description.as_deref(), Some("Street-style noodles."));
        assert_eq!(
            record.attributes.get("Total Time").map(String::as_str),
            Some("45 minutes")
        );
        assert_eq!(record.attributes.get("Course").map(String::as_str), Some("Main Course"));
        assert_eq!(record.attributes.get("Cuisine").map(String::as_str), Some("Thai"));
        // Tag container without a value contributes nothing
        assert!(!record.attributes.contains_key("Orphan"));
        // Item without the name sub-element is skipped, order preserved
        assert_eq!(record.ingredients, vec!["rice noodles", "2 eggs"]);
        assert_eq!(record.attributes.get("Calories").map(String::as_str), Some("450 kcal"));
        // Nutrition entry missing its unit is omitted
        assert!(!record.attributes.contains_key("Sodium"));
        assert_eq!(
            record.instructions.as_deref(),
            Some("Soak noodles. Fry everything.")
        );
    }

    #[test]
    fn page_without_exists_marker_is_rejected() {
        let config = detail_config(Some(ExistsCheck {
            selector: "a.wprm-recipe-jump".to_string(),
            expected_text: None,
        }));
        let selectors = DetailSelectors::compile(&config).unwrap();
        let document = Html::parse_document("<html><body><p>Just a roundup post</p></body></html>");

        assert!(extract_detail(&document, &selectors, &summary()).is_none());
    }

    #[test]
    fn exists_marker_text_must_match_exactly_when_configured() {
        let config = detail_config(Some(ExistsCheck {
            selector: "a.wprm-recipe-jump".to_string(),
            expected_text: Some("Jump to Recipe".to_string()),
        }));
        let selectors = DetailSelectors::compile(&config).unwrap();

        let document = Html::parse_document(DETAIL_PAGE);
        assert!(extract_detail(&document, &selectors, &summary()).is_some());

        let wrong = DETAIL_PAGE.replace("Jump to Recipe", "Skip to Content");
        let document = Html::parse_document(&wrong);
        assert!(extract_detail(&document, &selectors, &summary()).is_none());
    }

    #[test]
    fn short_time_text_omits_the_field_and_record_survives() {
        let config = detail_config(None);
        let selectors = DetailSelectors::compile(&config).unwrap();
        let page = DETAIL_PAGE.replace("Total Time 45 minutes", "45 minutes");
        let document = Html::parse_document(&page);

        let record = extract_detail(&document, &selectors, &summary()).unwrap();
        assert!(!record.attributes.contains_key("Total Time"));
        assert!(!record.attributes.contains_key("45 minutes"));
        // Sibling fields are unaffected
        assert_eq!(record.attributes.get("Cuisine").map(String::as_str), Some("Thai"));
    }

    #[test]
    fn minimal_page_still_yields_record_with_summary_fields() {
        let config = detail_config(None);
        let selectors = DetailSelectors::compile(&config).unwrap();
        let document = Html::parse_document("<html><body></body></html>");

        let record = extract_detail(&document, &selectors, &summary()).unwrap();
        assert_eq!(record.title, "Card title");
        assert_eq!(record.description, None);
        assert!(record.ingredients.is_empty());
        assert!(record.attributes.is_empty());
        assert_eq!(record.instructions, None);
    }
}
