//! Site configuration and the fetch seam used by the search pipeline

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SearchError;
use crate::query::RequestTarget;

/// Maximum number of listings returned for a single query
pub const MAX_RESULTS: usize = 5;

/// Configuration for the searched website
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Display name for the website
    pub name: String,
    /// Scheme and host prefixed onto relative product links
    pub base_url: String,
    /// Search URL pattern with {query} placeholder
    pub search_url_pattern: String,
    /// CSS selectors for extracting data
    pub selectors: SiteSelectors,
    /// Cap on the number of listings kept per page
    pub max_results: usize,
}

/// CSS selectors for the parts of a product card.
///
/// Each field holds ordered alternatives; the first one that matches inside
/// a card wins.
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    /// Container selector for individual products
    pub product_card: String,
    /// Anchor carrying the product link
    pub link: Vec<String>,
    /// Title/name selectors within the product card
    pub title: Vec<String>,
    /// Price selectors within the product card
    pub price: Vec<String>,
}

impl ScraperConfig {
    /// Configuration for takealot.com search results
    pub fn takealot() -> Self {
        Self {
            name: "Takealot".to_string(),
            base_url: "https://www.takealot.com".to_string(),
            search_url_pattern: "https://www.takealot.com/all?_sb=1&_r=1&_si=9ede1d4c09a3f19b0bcf8d9487e37477&qsearch={query}".to_string(),
            selectors: SiteSelectors {
                product_card: r#"[class*="product-card"]"#.to_string(),
                link: vec![r#"a[class*="product-card"]"#.to_string()],
                title: vec![
                    r#"span[class*="title"]"#.to_string(),
                    r#"div[class*="product-title"] span"#.to_string(),
                ],
                price: vec![
                    r#"span[class*="currency"]"#.to_string(),
                    r#"span[class*="price"] span[class*="amount"]"#.to_string(),
                ],
            },
            max_results: MAX_RESULTS,
        }
    }
}

/// Raw outcome of an upstream request
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code reported by the upstream site
    pub status: u16,
    /// Response body, left empty when the status is not a success
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to download search result pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the markup behind `target`.
    ///
    /// HTTP error codes are reported through [`FetchedPage::status`]; only
    /// transport failures and cancellation are returned as errors.
    ///
    /// # Arguments
    /// * `target` - The fully built search URL
    /// * `cancel` - Fires when the caller gives up on the request
    async fn fetch(
        &self,
        target: &RequestTarget,
        cancel: &CancellationToken,
    ) -> Result<FetchedPage, SearchError>;
}
