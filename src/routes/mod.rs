//! HTTP routes
//!
//! - GET /search?q=... - up to five product listings for the query
//! - GET /areas - areas with store price data
//! - GET /areas/:area/products - cheapest store for each product in an area
//! - GET /areas/:area/products/:product_id - cheapest store for one product
//! - GET /health - liveness probe

use std::sync::Arc;

use axum::extract::{FromRef, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::deal_finder::DealFinder;
use crate::error::SearchError;
use crate::models::{ProductResult, SearchParams};

pub mod areas;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub finder: DealFinder,
    pub catalog: Arc<Catalog>,
}

impl FromRef<AppState> for DealFinder {
    fn from_ref(state: &AppState) -> Self {
        state.finder.clone()
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

pub fn router(finder: DealFinder, catalog: Catalog) -> Router {
    let state = AppState {
        finder,
        catalog: Arc::new(catalog),
    };

    Router::new()
        .route("/search", get(search))
        .route("/areas", get(areas::list_areas))
        .route("/areas/:area/products", get(areas::get_products))
        .route("/areas/:area/products/:product_id", get(areas::get_product))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Search the configured site
///
/// GET /search?q=air+fryer
///
/// The fetch is cancelled when the client goes away: axum drops this future,
/// which drops the guard and cancels the token.
pub async fn search(
    State(finder): State<DealFinder>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductResult>>, SearchError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let products = finder.search(params.q.as_deref(), &cancel).await?;
    Ok(Json(products))
}

pub async fn health(State(finder): State<DealFinder>) -> Json<Value> {
    Json(json!({ "status": "ok", "site": finder.site_name() }))
}
