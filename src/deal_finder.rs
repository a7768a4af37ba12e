use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::SearchError;
use crate::extractor::ListingExtractor;
use crate::models::ProductResult;
use crate::query::{RequestTarget, SearchQuery};
use crate::traits::{PageFetcher, ScraperConfig};

/// Runs a search end to end: validate, build the URL, fetch, extract.
#[derive(Clone)]
pub struct DealFinder {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ListingExtractor>,
    config: Arc<ScraperConfig>,
}

impl DealFinder {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScraperConfig) -> Result<Self> {
        let extractor = ListingExtractor::new(&config)?;

        Ok(Self {
            fetcher,
            extractor: Arc::new(extractor),
            config: Arc::new(config),
        })
    }

    pub fn site_name(&self) -> &str {
        &self.config.name
    }

    pub async fn search(
        &self,
        q: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProductResult>, SearchError> {
        let query = SearchQuery::parse(q)?;
        let target = RequestTarget::build(&self.config, &query);

        info!("Searching {} for: {}", self.config.name, query.as_str());

        let page = self.fetcher.fetch(&target, cancel).await.inspect_err(|e| {
            warn!("Fetch failed for '{}' on {}: {}", query.as_str(), self.config.name, e);
        })?;

        if !page.is_success() {
            warn!(
                "Failed to fetch search page for '{}' on {}: {}",
                query.as_str(),
                self.config.name,
                page.status
            );
            return Err(SearchError::Upstream {
                status: page.status,
            });
        }

        let products = self.extractor.extract(&page.body);
        info!(
            "Found {} products for '{}' on {}",
            products.len(),
            query.as_str(),
            self.config.name
        );

        Ok(products)
    }
}
