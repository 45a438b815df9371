//! Enquiry routes
//!
//! The email submission path: persists the quote exactly like the save path,
//! then forwards the rendered enquiry to the sales inbox.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::domain::geometry::derive_areas;
use crate::domain::quote::{CreateEnquiryRequest, CustomerInfo, QuoteStatus};
use crate::error::ApiError;
use crate::routes::quotes::insert_quote;

/// Response DTO for a submitted enquiry.
#[derive(Debug, serde::Serialize)]
pub struct EnquirySubmitted {
    pub quote_id: Uuid,
    pub status: QuoteStatus,
}

/// POST /enquiries
///
/// Save the quote and email the breakdown to the sales team. The quote is
/// persisted before the email is attempted, so a transport failure never
/// loses the record; the failure reason is returned to the caller as-is.
pub async fn create_enquiry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEnquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.customer_name.trim().is_empty() || req.customer_email.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "customer_name and customer_email are required".to_string(),
        ));
    }

    tracing::info!(
        customer_name = %req.customer_name,
        total = %req.price_breakdown.total,
        request_survey = req.request_survey,
        "Enquiry received"
    );

    let areas = derive_areas(
        req.configuration.length,
        req.configuration.depth,
        req.configuration.door_type,
    );

    let customer = CustomerInfo {
        name: Some(req.customer_name.clone()),
        email: Some(req.customer_email.clone()),
        phone: req.customer_phone.clone(),
    };

    let quote_id = insert_quote(
        &state.db,
        &customer,
        &req.configuration,
        &areas,
        &req.price_breakdown,
        req.request_survey,
    )
    .await?;

    state.mailer.send_enquiry(&req, &areas).await?;

    let response = EnquirySubmitted {
        quote_id,
        status: QuoteStatus::on_submission(req.request_survey),
    };
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}
