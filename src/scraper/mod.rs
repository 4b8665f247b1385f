//! Two-stage web scraper: listing-page discovery, then per-recipe detail
//! extraction. Both stages are driven entirely by the selectors in
//! [`SiteConfig`] and fetch strictly sequentially, skipping failed URLs.

pub mod detail;

use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{ConfigError, SiteConfig};
use crate::models::RecipeSummary;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Scraper {
    client: Client,
}

/// Compiled listing selectors, parsed once per site before any fetch.
struct CardSelectors {
    card: Selector,
    title: Selector,
    image: Selector,
    anchor: Selector,
}

pub(crate) fn parse_selector(raw: &str) -> Result<Selector, ConfigError> {
    Selector::parse(raw).map_err(|e| ConfigError::Selector {
        selector: raw.to_string(),
        message: format!("{e:?}"),
    })
}

impl CardSelectors {
    fn compile(config: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: parse_selector(&config.listing.card)?,
            title: parse_selector(&config.listing.title)?,
            image: parse_selector(&config.listing.image)?,
            anchor: parse_selector("a")?,
        })
    }
}

impl Scraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// GET a page, honoring the site's extra headers. Any failure (network
    /// error or non-200 status) is logged and yields `None`; the caller moves
    /// on to the next URL.
    async fn fetch(&self, url: &str, config: &SiteConfig) -> Option<String> {
        let mut request = self.client.get(url);
        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Failed to fetch {}: status {}", url, response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Failed to read body of {}: {}", url, e);
                None
            }
        }
    }

    /// Walk the listing pages in order and collect one summary per recipe
    /// card. Pages that fail to fetch contribute nothing; cards missing a
    /// title or image still yield a (degraded) summary.
    pub async fn scrape_listings(
        &self,
        urls: &[String],
        config: &SiteConfig,
    ) -> Result<Vec<RecipeSummary>> {
        let selectors = CardSelectors::compile(config)?;
        let mut summaries = Vec::new();

        for url in urls {
            info!("Scraping {}", url);

            let Some(body) = self.fetch(url, config).await else {
                continue;
            };

            let document = Html::parse_document(&body);
            summaries.extend(collect_cards(&document, &selectors, &config.listing.image_attr));
        }

        info!("Found {} recipe cards on {}", summaries.len(), config.name);
        Ok(summaries)
    }
}

/// Extract card summaries from one parsed listing page.
fn collect_cards(document: &Html, selectors: &CardSelectors, image_attr: &str) -> Vec<RecipeSummary> {
    let mut summaries = Vec::new();

    for card in document.select(&selectors.card) {
        let (title, link) = match card.select(&selectors.title).next() {
            Some(title_el) => (
                title_el.text().collect::<String>().trim().to_string(),
                title_el
                    .select(&selectors.anchor)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(str::to_string),
            ),
            None => ("No title".to_string(), None),
        };

        let image_url = card
            .select(&selectors.image)
            .next()
            .and_then(|img| img.value().attr(image_attr))
            .map(str::to_string);

        summaries.push(RecipeSummary { title, link, image_url });
    }

    summaries
}
