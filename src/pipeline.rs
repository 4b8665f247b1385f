use anyhow::Result;
use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::database::Database;
use crate::models::RecipeRecord;
use crate::normalize::{self, synonyms};
use crate::scraper::Scraper;
use crate::urls::generate_urls;

/// Store holding the cross-source normalized table.
pub const STANDARDISED_DB_URL: &str = "sqlite:data/standardised_recipes.db";

pub struct Pipeline {
    scraper: Scraper,
}

impl Pipeline {
    pub fn new() -> Result<Self> {
        Ok(Self { scraper: Scraper::new()? })
    }

    /// Run the full scrape for one site: listing discovery, detail
    /// extraction, then replace that site's raw table.
    pub async fn run(&self, site: &SiteConfig) -> Result<()> {
        info!("Scraping site {}", site.name);

        let urls = generate_urls(site)?;
        let summaries = self.scraper.scrape_listings(&urls, site).await?;
        let records = self.scraper.extract_details(&summaries, site).await?;

        let db = Database::open(&site.database_url).await?;
        db.replace_raw(&records).await?;

        info!(
            "Site {} done: {} listing pages, {} cards, {} recipes stored",
            site.name,
            urls.len(),
            summaries.len(),
            records.len()
        );
        Ok(())
    }

    /// Rebuild the standardized table from every site's raw store. Sites
    /// that have not been scraped yet are skipped.
    pub async fn normalize(&self, sites: &[SiteConfig], normalized_db_url: &str) -> Result<()> {
        let mut all_records: Vec<RecipeRecord> = Vec::new();

        for site in sites {
            let db = Database::open(&site.database_url).await?;
            if !db.has_recipes().await? {
                warn!("No scraped data for site {}, skipping", site.name);
                continue;
            }
            let records = db.load_raw().await?;
            info!("Loaded {} raw recipes from {}", records.len(), site.name);
            all_records.extend(records);
        }

        let normalized =
            normalize::standardize(&all_records, synonyms::CUISINES, synonyms::COURSES);
        info!(
            "Normalized {} of {} recipes ({} dropped without a known cuisine)",
            normalized.len(),
            all_records.len(),
            all_records.len() - normalized.len()
        );

        let db = Database::open(normalized_db_url).await?;
        db.replace_normalized(&normalized).await?;
        Ok(())
    }
}
