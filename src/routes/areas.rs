//! Area price comparison routes

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::models::{AreaProductsResponse, AreasResponse, ProductSummary};

/// GET /areas
pub async fn list_areas(State(catalog): State<Arc<Catalog>>) -> Json<AreasResponse> {
    Json(AreasResponse {
        areas: catalog.available_areas(),
    })
}

/// GET /areas/{area}/products
///
/// Every product in the area with its cheapest store.
pub async fn get_products(
    State(catalog): State<Arc<Catalog>>,
    Path(area): Path<String>,
) -> Result<Json<AreaProductsResponse>, CatalogError> {
    let products = catalog.summarize_cheapest_products(&area)?;

    Ok(Json(AreaProductsResponse {
        area: area.to_lowercase(),
        products,
    }))
}

/// GET /areas/{area}/products/{product_id}
pub async fn get_product(
    State(catalog): State<Arc<Catalog>>,
    Path((area, product_id)): Path<(String, String)>,
) -> Result<Json<ProductSummary>, CatalogError> {
    catalog
        .find_product(&area, &product_id)?
        .map(Json)
        .ok_or(CatalogError::ProductNotFound { area, product_id })
}
