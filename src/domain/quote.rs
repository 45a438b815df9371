//! Quote record types
//!
//! The durable artifact of a submission: a configuration snapshot, the
//! derived areas, the price breakdown the customer saw, optional contact
//! details, and a one-shot lifecycle status. Records are append-only; there
//! is no update or delete path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::configuration::RoomConfiguration;
use super::geometry::Areas;
use super::pricing::PriceBreakdown;

/// Quote lifecycle. `Draft` exists only client-side before submission; the
/// single persisted transition picks `Saved` or `SurveyRequested` based on
/// the survey flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Saved,
    SurveyRequested,
}

impl Default for QuoteStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl QuoteStatus {
    /// Status assigned at submission time.
    pub fn on_submission(request_survey: bool) -> Self {
        if request_survey {
            Self::SurveyRequested
        } else {
            Self::Saved
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Saved => "saved",
            Self::SurveyRequested => "survey_requested",
        }
    }

    pub fn from_str_or_draft(s: &str) -> Self {
        match s {
            "saved" => Self::Saved,
            "survey_requested" => Self::SurveyRequested,
            _ => Self::Draft,
        }
    }
}

/// Optional customer identity attached to a submission.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Persisted quote entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: Uuid,
    pub customer: CustomerInfo,
    pub configuration: RoomConfiguration,
    pub areas: Areas,
    pub price_breakdown: PriceBreakdown,
    pub request_survey: bool,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for saving a quote. The breakdown is the snapshot the customer
/// saw at submission time and is persisted as-is; the server derives the
/// areas from the configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub configuration: RoomConfiguration,
    pub price_breakdown: PriceBreakdown,
    #[serde(default)]
    pub request_survey: bool,
}

impl CreateQuoteRequest {
    pub fn customer(&self) -> CustomerInfo {
        CustomerInfo {
            name: self.customer_name.clone(),
            email: self.customer_email.clone(),
            phone: self.customer_phone.clone(),
        }
    }
}

/// Request DTO for an email enquiry: a quote submission plus the customer
/// contact details the sales team replies to.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnquiryRequest {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub configuration: RoomConfiguration,
    pub price_breakdown: PriceBreakdown,
    #[serde(default)]
    pub request_survey: bool,
}

/// Response DTO for a quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub configuration: RoomConfiguration,
    pub areas: Areas,
    pub price_breakdown: PriceBreakdown,
    pub request_survey: bool,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

impl From<QuoteRecord> for QuoteResponse {
    fn from(q: QuoteRecord) -> Self {
        Self {
            id: q.id,
            customer_name: q.customer.name,
            customer_email: q.customer.email,
            customer_phone: q.customer.phone,
            configuration: q.configuration,
            areas: q.areas,
            price_breakdown: q.price_breakdown,
            request_survey: q.request_survey,
            status: q.status,
            created_at: q.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_status_follows_survey_flag() {
        assert_eq!(QuoteStatus::on_submission(true), QuoteStatus::SurveyRequested);
        assert_eq!(QuoteStatus::on_submission(false), QuoteStatus::Saved);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&QuoteStatus::SurveyRequested).unwrap();
        assert_eq!(json, "\"survey_requested\"");
        assert_eq!(
            QuoteStatus::from_str_or_draft("survey_requested"),
            QuoteStatus::SurveyRequested
        );
        assert_eq!(QuoteStatus::from_str_or_draft("bogus"), QuoteStatus::Draft);
    }

    #[test]
    fn status_string_round_trips() {
        for status in [QuoteStatus::Draft, QuoteStatus::Saved, QuoteStatus::SurveyRequested] {
            assert_eq!(QuoteStatus::from_str_or_draft(status.as_str()), status);
        }
    }
}
