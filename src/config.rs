//! Per-site scraping configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pagination config: {0}")]
    Pagination(String),

    #[error("failed to parse selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

/// How listing pages are enumerated for a site.
#[derive(Debug, Clone)]
pub enum Pagination {
    /// Flat page range `1..=n`; the listing URL has one `{}` placeholder.
    Pages(u32),
    /// Per-category page ranges, crawled in input order; the listing URL has
    /// two `{}` placeholders (category slug, then page number).
    Categories(Vec<CategoryPages>),
}

#[derive(Debug, Clone)]
pub struct CategoryPages {
    pub slug: String,
    pub pages: u32,
}

/// CSS selectors for pulling recipe cards off a listing page.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// Container selector for one recipe card
    pub card: String,
    /// Title element within the card; the detail link is an anchor nested
    /// under it
    pub title: String,
    /// Image element within the card
    pub image: String,
    /// Attribute on the image element holding the URL (e.g. `src`,
    /// `data-lazy-src`)
    pub image_attr: String,
}

/// CSS selectors for the structured fields of a detail page. Every field is
/// extracted independently; a selector that matches nothing just omits the
/// field.
#[derive(Debug, Clone)]
pub struct DetailSelectors {
    pub title: String,
    pub description: String,
    /// Block whose text is "<label> <label> <value> <value>", e.g.
    /// "Total Time 45 minutes"
    pub time: String,
    /// Container holding tag label/value pairs (cuisine, course, ...)
    pub tags: String,
    /// One element per ingredient line
    pub ingredients: String,
    /// One element per nutrition entry
    pub nutrition: String,
    pub instructions: String,
    /// Marker that distinguishes a genuine recipe page from e.g. a roundup
    /// post that made it onto the listing
    pub exists: Option<ExistsCheck>,
}

#[derive(Debug, Clone)]
pub struct ExistsCheck {
    pub selector: String,
    /// When set, the marker's trimmed text must equal this exactly
    pub expected_text: Option<String>,
}

/// Immutable configuration for one source blog. Created once in the site
/// registry, never mutated.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Registry name, also used in log lines
    pub name: String,
    /// Listing URL template with `{}` placeholders per the pagination mode
    pub listing_url: String,
    pub pagination: Pagination,
    /// Extra request headers, e.g. a User-Agent override for sites that
    /// reject the default client
    pub headers: Vec<(String, String)>,
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
    /// Raw row-store for this site, replaced wholesale each run
    pub database_url: String,
}
