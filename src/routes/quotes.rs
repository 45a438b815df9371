//! Quote routes
//!
//! Quote submission and history. Records are append-only snapshots; there is
//! no update or delete surface.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use sqlx::types::Json as SqlJson;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::pagination::{Paginated, PaginationParams};
use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::domain::geometry::derive_areas;
use crate::domain::quote::{
    CreateQuoteRequest, CustomerInfo, QuoteRecord, QuoteResponse, QuoteStatus,
};
use crate::domain::{Areas, PriceBreakdown, RoomConfiguration};
use crate::error::ApiError;

/// Database row for a quote
#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    configuration: SqlJson<RoomConfiguration>,
    areas: SqlJson<Areas>,
    price_breakdown: SqlJson<PriceBreakdown>,
    request_survey: bool,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<QuoteRow> for QuoteRecord {
    fn from(row: QuoteRow) -> Self {
        Self {
            id: row.id,
            customer: CustomerInfo {
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
            },
            configuration: row.configuration.0,
            areas: row.areas.0,
            price_breakdown: row.price_breakdown.0,
            request_survey: row.request_survey,
            status: QuoteStatus::from_str_or_draft(&row.status),
            created_at: row.created_at,
        }
    }
}

/// One-shot quote write shared by the save and enquiry paths. Status is
/// derived from the survey flag at this point and never changes again.
pub(crate) async fn insert_quote(
    db: &PgPool,
    customer: &CustomerInfo,
    configuration: &RoomConfiguration,
    areas: &Areas,
    breakdown: &PriceBreakdown,
    request_survey: bool,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let status = QuoteStatus::on_submission(request_survey);

    sqlx::query(
        r#"
        INSERT INTO quotes (id, customer_name, customer_email, customer_phone,
                            configuration, areas, price_breakdown, request_survey, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(&customer.phone)
    .bind(SqlJson(configuration))
    .bind(SqlJson(areas))
    .bind(SqlJson(breakdown))
    .bind(request_survey)
    .bind(status.as_str())
    .execute(db)
    .await?;

    tracing::info!(
        quote_id = %id,
        status = status.as_str(),
        total = %breakdown.total,
        "Quote saved"
    );

    Ok(id)
}

/// Response DTO for a created quote.
#[derive(Debug, serde::Serialize)]
pub struct QuoteCreated {
    pub id: Uuid,
    pub status: QuoteStatus,
}

/// POST /quotes
///
/// Persist a quote snapshot. The breakdown is stored exactly as submitted;
/// the areas are re-derived from the configuration.
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let areas = derive_areas(
        req.configuration.length,
        req.configuration.depth,
        req.configuration.door_type,
    );

    let id = insert_quote(
        &state.db,
        &req.customer(),
        &req.configuration,
        &areas,
        &req.price_breakdown,
        req.request_survey,
    )
    .await?;

    let response = QuoteCreated {
        id,
        status: QuoteStatus::on_submission(req.request_survey),
    };
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// GET /quotes
///
/// List saved quotes, newest first.
pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
        .fetch_one(&state.db)
        .await?;

    let rows = sqlx::query_as::<_, QuoteRow>(
        r#"
        SELECT id, customer_name, customer_email, customer_phone,
               configuration, areas, price_breakdown, request_survey, status, created_at
        FROM quotes
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(pagination.limit() as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(&state.db)
    .await?;

    let data: Vec<QuoteResponse> = rows
        .into_iter()
        .map(|row| QuoteResponse::from(QuoteRecord::from(row)))
        .collect();
    Ok(Json(Paginated::new(data, &pagination, total as u64)))
}
