pub mod enquiries;
pub mod health;
pub mod pricing;
pub mod quotes;

use axum::{routing::get, routing::post, routing::put, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Pricing
        .route("/pricing/calculate", post(pricing::calculate_price))
        .route("/pricing/catalog", get(pricing::get_catalog))
        .route("/pricing/catalog", put(pricing::update_price))
        // Quotes
        .route("/quotes", post(quotes::create_quote))
        .route("/quotes", get(quotes::list_quotes))
        // Enquiries
        .route("/enquiries", post(enquiries::create_enquiry))
}
