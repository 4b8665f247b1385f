//! Registry of the source blogs.
//!
//! Each entry is pure configuration: URL template, pagination, and the
//! selector set for that blog's markup. The pipeline itself is generic, so
//! adding a blog means adding one constructor here.

use crate::config::{
    CategoryPages, DetailSelectors, ExistsCheck, ListingSelectors, Pagination, SiteConfig,
};

const FIREFOX_UA: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/117.0";

pub fn all() -> Vec<SiteConfig> {
    vec![japanese(), korean(), thai(), chinese(), indian()]
}

pub fn by_name(name: &str) -> Option<SiteConfig> {
    all().into_iter().find(|site| site.name == name)
}

fn japanese() -> SiteConfig {
    SiteConfig {
        name: "japanese".to_string(),
        listing_url: "https://www.justonecookbook.com/recipes/page/{}/".to_string(),
        pagination: Pagination::Pages(19),
        headers: Vec::new(),
        listing: ListingSelectors {
            card: "article.post-filter.post-sm.post-abbr".to_string(),
            title: "h3.article-title".to_string(),
            image: "img".to_string(),
            image_attr: "src".to_string(),
        },
        detail: DetailSelectors {
            title: "h2.wprm-recipe-name.wprm-block-text-bold".to_string(),
            description: "div.wprm-recipe-summary.wprm-block-text-normal".to_string(),
            time: "div.wprm-recipe-total-time-container".to_string(),
            tags: "div.wprm-recipe-meta-container".to_string(),
            ingredients: "li.wprm-recipe-ingredient".to_string(),
            nutrition: "span.wprm-nutrition-label-text-nutrition-container".to_string(),
            instructions: "div.wprm-recipe-instructions-container".to_string(),
            exists: Some(ExistsCheck {
                selector: "span.jump-text".to_string(),
                expected_text: Some("Jump to Recipe".to_string()),
            }),
        },
        database_url: "sqlite:data/japanese_recipes.db".to_string(),
    }
}

fn korean() -> SiteConfig {
    SiteConfig {
        name: "korean".to_string(),
        listing_url: "https://kimchimari.com/category/{}/page/{}/".to_string(),
        pagination: Pagination::Categories(vec![
            category("soups-guk-and-stews-jjigae/", 3),
            category("appetizer-2/", 2),
            category("salads/", 2),
            category("main-dishes/", 5),
            category("side-dishes/", 5),
            category("desserts/", 3),
        ]),
        headers: Vec::new(),
        listing: ListingSelectors {
            card: "article.status-publish".to_string(),
            title: "h2.entry-title".to_string(),
            image: "img".to_string(),
            image_attr: "data-lazy-src".to_string(),
        },
        detail: DetailSelectors {
            title: "h2.wprm-recipe-name".to_string(),
            description: "div.wprm-recipe-summary.wprm-block-text-normal".to_string(),
            time: "div.wprm-recipe-total-time-container".to_string(),
            tags: "div.wprm-recipe-tags-container".to_string(),
            ingredients: "li.wprm-recipe-ingredient".to_string(),
            nutrition: "span.wprm-nutrition-label-text-nutrition-container".to_string(),
            instructions: "ul.wprm-recipe-instructions".to_string(),
            exists: Some(ExistsCheck {
                selector: "a.wprm-recipe-jump".to_string(),
                expected_text: None,
            }),
        },
        database_url: "sqlite:data/korean_recipes.db".to_string(),
    }
}

fn thai() -> SiteConfig {
    SiteConfig {
        name: "thai".to_string(),
        listing_url: "https://hungryinthailand.com/category/{}/page/{}/".to_string(),
        pagination: Pagination::Categories(vec![
            category("thai-appetizers/", 2),
            category("thai-salads/", 1),
            category("thai-side-dish-recipes/", 1),
            category("thai-dinner/", 4),
            category("thai-desserts/", 1),
            category("thai-soups/", 1),
        ]),
        headers: Vec::new(),
        listing: ListingSelectors {
            card: "article.status-publish".to_string(),
            title: "h2.entry-title".to_string(),
            image: "div.post-thumbnail-inner img".to_string(),
            image_attr: "data-lzl-src".to_string(),
        },
        detail: DetailSelectors {
            title: "h2.wprm-recipe-name.wprm-block-text-bold".to_string(),
            description: "div.wprm-recipe-summary.wprm-block-text-normal".to_string(),
            time: "div.wprm-recipe-total-time-container".to_string(),
            tags: "div.wprm-recipe-custom-container".to_string(),
            ingredients: "li.wprm-recipe-ingredient".to_string(),
            nutrition: "span.wprm-nutrition-label-text-nutrition-container".to_string(),
            instructions: "div.wprm-recipe-instructions-container".to_string(),
            exists: Some(ExistsCheck {
                selector: "a.wprm-recipe-jump".to_string(),
                expected_text: None,
            }),
        },
        database_url: "sqlite:data/thai_recipes.db".to_string(),
    }
}

fn chinese() -> SiteConfig {
    SiteConfig {
        name: "chinese".to_string(),
        listing_url: "https://omnivorescookbook.com/recipe-filter/page/{}/".to_string(),
        pagination: Pagination::Pages(36),
        headers: Vec::new(),
        listing: ListingSelectors {
            card: "article.post-sm.post-abbr".to_string(),
            title: "h3.entry-title".to_string(),
            image: "img".to_string(),
            image_attr: "src".to_string(),
        },
        detail: DetailSelectors {
            title: "h2.wprm-recipe-name.wprm-block-text-bold".to_string(),
            description: "div.wprm-recipe-summary.wprm-block-text-normal".to_string(),
            time: "div.wprm-recipe-total-time-container".to_string(),
            tags: "div.wprm-recipe-meta-container".to_string(),
            ingredients: "li.wprm-recipe-ingredient".to_string(),
            nutrition: "span.wprm-nutrition-label-text-nutrition-container".to_string(),
            instructions: "div.wprm-recipe-instructions-container".to_string(),
            exists: Some(ExistsCheck {
                selector: "a.recipe-jump".to_string(),
                expected_text: None,
            }),
        },
        database_url: "sqlite:data/chinese_recipes.db".to_string(),
    }
}

fn indian() -> SiteConfig {
    SiteConfig {
        name: "indian".to_string(),
        listing_url: "https://ministryofcurry.com/recipe-search/?_paged={}".to_string(),
        pagination: Pagination::Pages(20),
        // The site rejects the default client, so spoof a browser
        headers: vec![("User-Agent".to_string(), FIREFOX_UA.to_string())],
        listing: ListingSelectors {
            card: "div.fwpl-result".to_string(),
            title: "div.fwpl-item.el-cjl7ci".to_string(),
            image: "img".to_string(),
            image_attr: "data-lazy-src".to_string(),
        },
        detail: DetailSelectors {
            title: "h2.wprm-recipe-name".to_string(),
            description: "div.wprm-recipe-summary.wprm-block-text-normal".to_string(),
            time: "div.wprm-recipe-total-time-container".to_string(),
            tags: "div.wprm-recipe-tags-container".to_string(),
            ingredients: "li.wprm-recipe-ingredient".to_string(),
            nutrition: "span.wprm-nutrition-label-text-nutrition-container".to_string(),
            instructions: "ul.wprm-recipe-instructions".to_string(),
            exists: Some(ExistsCheck {
                selector: "a.wprm-recipe-jump".to_string(),
                expected_text: None,
            }),
        },
        database_url: "sqlite:data/indian_recipes.db".to_string(),
    }
}

fn category(slug: &str, pages: u32) -> CategoryPages {
    CategoryPages { slug: slug.to_string(), pages }
}
