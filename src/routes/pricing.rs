//! Pricing routes
//!
//! Live quote calculation and the editable price catalog.

use axum::{extract::State, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::response::{DataResponse, MessageResponse};
use crate::app::AppState;
use crate::domain::pricing::calculate;
use crate::domain::RoomConfiguration;
use crate::error::ApiError;
use crate::services::catalog_store;

/// POST /pricing/calculate
///
/// Compute a full quotation for a configuration. Reads a fresh catalog
/// snapshot per call, so admin price edits take effect immediately.
pub async fn calculate_price(
    State(state): State<Arc<AppState>>,
    Json(config): Json<RoomConfiguration>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(
        length = %config.length,
        depth = %config.depth,
        door_type = ?config.door_type,
        "Calculating price"
    );

    let catalog = catalog_store::load_catalog(&state.db).await?;
    let quotation = calculate(&config, &catalog);

    Ok(Json(DataResponse::new(quotation)))
}

/// Catalog entry as returned to the admin UI.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// GET /pricing/catalog
///
/// The full price list as a category -> item -> entry map.
pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = catalog_store::list_entries(&state.db).await?;

    let mut catalog: BTreeMap<String, BTreeMap<String, CatalogEntry>> = BTreeMap::new();
    for row in rows {
        catalog.entry(row.category).or_default().insert(
            row.item,
            CatalogEntry {
                price: row.price,
                unit: row.unit,
                description: row.description,
            },
        );
    }

    Ok(Json(DataResponse::new(catalog)))
}

/// Request DTO for a price upsert.
#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub category: String,
    pub item: String,
    pub price: Decimal,
}

/// PUT /pricing/catalog
///
/// Upsert one price list entry (admin price editing surface).
pub async fn update_price(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.category.trim().is_empty() || req.item.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "category and item must be non-empty".to_string(),
        ));
    }

    tracing::info!(
        category = %req.category,
        item = %req.item,
        price = %req.price,
        "Updating price list entry"
    );

    catalog_store::set_price(&state.db, &req.category, &req.item, req.price).await?;

    Ok(Json(MessageResponse::new("Price updated")))
}
