//! Data models for search requests, product listings and area price data

use serde::{Deserialize, Serialize};

/// A product listing extracted from a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductResult {
    pub title: String,
    pub price: String,
    pub link: String,
}

/// Query string accepted by the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Body returned for rejected client input
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body returned when the upstream site could not be fetched
#[derive(Debug, Serialize)]
pub struct ProblemBody {
    pub title: String,
    pub status: u16,
    pub upstream_status: Option<u16>,
}

/// Body returned when an area or product is unknown
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub detail: String,
}

/// Price of a product in one store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorePrice {
    pub store_name: String,
    pub price: f64,
}

/// A product sold in an area, with the prices of every store carrying it
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub prices: Vec<StorePrice>,
}

/// A product together with its cheapest store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub cheapest_price: f64,
    pub cheapest_store: String,
    pub stores: Vec<StorePrice>,
}

/// Response for `GET /areas`
#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<String>,
}

/// Response for `GET /areas/{area}/products`
#[derive(Debug, Serialize)]
pub struct AreaProductsResponse {
    pub area: String,
    pub products: Vec<ProductSummary>,
}
