//! Listing-page URL generation

use crate::config::{ConfigError, Pagination, SiteConfig};

/// Expand a site's URL template into the ordered list of listing pages to
/// crawl. Pages run `1..=n` ascending; categories keep their input order and
/// are not deduplicated. Fails before any fetch happens if the template does
/// not match the pagination mode.
pub fn generate_urls(config: &SiteConfig) -> Result<Vec<String>, ConfigError> {
    let placeholders = config.listing_url.matches("{}").count();

    match &config.pagination {
        Pagination::Pages(pages) => {
            if *pages == 0 {
                return Err(ConfigError::Pagination(format!(
                    "site {:?}: page count must be at least 1",
                    config.name
                )));
            }
            if placeholders != 1 {
                return Err(ConfigError::Pagination(format!(
                    "site {:?}: flat pagination needs exactly one {{}} placeholder, found {}",
                    config.name, placeholders
                )));
            }
            Ok((1..=*pages)
                .map(|page| config.listing_url.replacen("{}", &page.to_string(), 1))
                .collect())
        }
        Pagination::Categories(categories) => {
            if categories.is_empty() {
                return Err(ConfigError::Pagination(format!(
                    "site {:?}: category pagination needs at least one category",
                    config.name
                )));
            }
            if placeholders != 2 {
                return Err(ConfigError::Pagination(format!(
                    "site {:?}: category pagination needs exactly two {{}} placeholders, found {}",
                    config.name, placeholders
                )));
            }
            let mut urls = Vec::new();
            for category in categories {
                for page in 1..=category.pages {
                    urls.push(
                        config
                            .listing_url
                            .replacen("{}", &category.slug, 1)
                            .replacen("{}", &page.to_string(), 1),
                    );
                }
            }
            Ok(urls)
        }
    }
}
