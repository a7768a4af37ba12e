//! Store price comparison per area
//!
//! Each area carries a list of products and the price every store asks for
//! them. Lookups are case-insensitive on the area name.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::CatalogError;
use crate::models::{ProductListing, ProductSummary, StorePrice};

mod data;

/// Read-only price data keyed by lowercase area name
#[derive(Debug, Clone)]
pub struct Catalog {
    areas: BTreeMap<String, Vec<ProductListing>>,
}

impl Catalog {
    pub fn new(areas: BTreeMap<String, Vec<ProductListing>>) -> Self {
        let areas = areas
            .into_iter()
            .map(|(area, listings)| (area.to_lowercase(), listings))
            .collect();

        Self { areas }
    }

    /// Catalog backed by the bundled demo dataset
    pub fn demo() -> Self {
        Self::new(data::demo_areas())
    }

    /// Area names in sorted order
    pub fn available_areas(&self) -> Vec<String> {
        self.areas.keys().cloned().collect()
    }

    pub fn products_for_area(&self, area: &str) -> Result<&[ProductListing], CatalogError> {
        self.areas
            .get(&area.to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::AreaNotFound {
                area: area.to_string(),
            })
    }

    /// Cheapest store for every product in `area`.
    ///
    /// Products without any store price have no cheapest store and are left out.
    pub fn summarize_cheapest_products(
        &self,
        area: &str,
    ) -> Result<Vec<ProductSummary>, CatalogError> {
        let summaries = self
            .products_for_area(area)?
            .iter()
            .filter_map(|listing| {
                let summary = summarize(listing);
                if summary.is_none() {
                    warn!("Product {} in {} has no store prices", listing.product_id, area);
                }
                summary
            })
            .collect();

        Ok(summaries)
    }

    /// Cheapest-price summary of one product, `None` when the area lacks it
    pub fn find_product(
        &self,
        area: &str,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError> {
        Ok(self
            .products_for_area(area)?
            .iter()
            .find(|listing| listing.product_id == product_id)
            .and_then(summarize))
    }
}

/// Lowest price; the earliest store wins a tie
fn cheapest_price(prices: &[StorePrice]) -> Option<&StorePrice> {
    prices.iter().min_by(|a, b| a.price.total_cmp(&b.price))
}

fn summarize(listing: &ProductListing) -> Option<ProductSummary> {
    let cheapest = cheapest_price(&listing.prices)?;

    Some(ProductSummary {
        product_id: listing.product_id.clone(),
        name: listing.name.clone(),
        category: listing.category.clone(),
        cheapest_price: cheapest.price,
        cheapest_store: cheapest.store_name.clone(),
        stores: listing.prices.clone(),
    })
}
