//! Mail provider client
//!
//! Thin client for the Resend HTTP API, plus the enquiry document renderer.
//! The renderer consumes exactly the configuration + breakdown fields the
//! pricing core produces; transport failures surface to the caller as a
//! single upstream error with a human-readable reason, with no retries here.

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::configuration::RoomConfiguration;
use crate::domain::geometry::Areas;
use crate::domain::pricing::PriceBreakdown;
use crate::domain::quote::CreateEnquiryRequest;
use crate::error::ApiError;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Client for the transactional mail provider.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_key: String,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl Mailer {
    /// Create a mail client. `from`/`to` are the fixed enquiry addresses;
    /// customers are reached by replying to the address in the document.
    pub fn new(api_key: &str, from: &str, to: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(to = to, "Mailer initialized");

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Render and send one enquiry email to the sales inbox.
    pub async fn send_enquiry(
        &self,
        enquiry: &CreateEnquiryRequest,
        areas: &Areas,
    ) -> Result<String, ApiError> {
        let subject = format!("New Garden Room Enquiry from {}", enquiry.customer_name);
        let html = render_enquiry_html(enquiry, areas);

        debug!(to = %self.to, subject = %subject, "Sending enquiry email");

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: &self.to,
                subject: &subject,
                html: &html,
            })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Mail provider request failed");
                ApiError::Upstream(format!("Failed to send enquiry email: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Mail provider rejected the email");
            return Err(ApiError::Upstream(format!(
                "Failed to send enquiry email: mail provider returned {}",
                status
            )));
        }

        let sent: SendEmailResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse mail provider response");
            ApiError::Upstream("Failed to send enquiry email: invalid provider response".into())
        })?;

        tracing::info!(email_id = %sent.id, "Enquiry email sent");

        Ok(sent.id)
    }
}

/// Humanize an enum key for display: underscores become spaces, each word is
/// title-cased ("upvc_french_180" -> "Upvc French 180").
pub fn format_label(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn price_row(label: &str, amount: rust_decimal::Decimal) -> String {
    format!(
        r#"<div class="price-row"><span>{}:</span><span>£{}</span></div>"#,
        label, amount
    )
}

/// Render the enquiry notification document. Zero-valued optional buckets
/// (laminated floor, skimmed finish, windows) are omitted.
pub fn render_enquiry_html(enquiry: &CreateEnquiryRequest, areas: &Areas) -> String {
    let config: &RoomConfiguration = &enquiry.configuration;
    let breakdown: &PriceBreakdown = &enquiry.price_breakdown;

    let mut customer_block = format!(
        "<p><strong>Name:</strong> {}</p>\n<p><strong>Email:</strong> {}</p>",
        enquiry.customer_name, enquiry.customer_email
    );
    if let Some(phone) = &enquiry.customer_phone {
        customer_block.push_str(&format!("\n<p><strong>Phone:</strong> {}</p>", phone));
    }
    if let Some(message) = &enquiry.message {
        customer_block.push_str(&format!(
            "\n<p><strong>Message:</strong><br>{}</p>",
            message
        ));
    }

    let mut price_rows = String::new();
    price_rows.push_str(&price_row(
        "Garden Room Shell (inc. fixed costs)",
        breakdown.shell,
    ));
    if breakdown.laminated_floor > rust_decimal::Decimal::ZERO {
        price_rows.push_str(&price_row("Laminated Flooring", breakdown.laminated_floor));
    }
    if breakdown.skimmed_finish > rust_decimal::Decimal::ZERO {
        price_rows.push_str(&price_row("Skimmed Finish", breakdown.skimmed_finish));
    }
    price_rows.push_str(&price_row("Electrical", breakdown.electricals));
    price_rows.push_str(&price_row("Doors", breakdown.doors));
    if breakdown.windows > rust_decimal::Decimal::ZERO {
        price_rows.push_str(&price_row("Windows", breakdown.windows));
    }
    price_rows.push_str(&price_row("Cladding", breakdown.cladding));
    price_rows.push_str(&price_row("Subtotal (ex VAT)", breakdown.subtotal));
    price_rows.push_str(&price_row("VAT (20%)", breakdown.vat));
    price_rows.push_str(&format!(
        r#"<div class="price-row total-row"><span>TOTAL (inc VAT):</span><span>£{}</span></div>"#,
        breakdown.total
    ));

    let door_label = format_label(config.door_type.catalog_item());
    let front_cladding = format_label(cladding_key(config, true));
    let side_rear_cladding = format_label(cladding_key(config, false));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
  body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
  .header {{ background-color: #20232A; color: white; padding: 20px; text-align: center; }}
  .section {{ margin-bottom: 30px; }}
  .price-breakdown {{ background-color: #f5f5f5; padding: 20px; border-radius: 8px; }}
  .price-row {{ display: flex; justify-content: space-between; margin-bottom: 8px; }}
  .total-row {{ font-weight: bold; font-size: 1.2em; color: #D4AF37; border-top: 2px solid #D4AF37; padding-top: 8px; }}
</style>
</head>
<body>
<div class="header">
  <h1>New Garden Room Enquiry</h1>
  <p>Received: {received}</p>
</div>
<div class="section">
  <h2>Customer Information</h2>
  {customer_block}
</div>
<div class="section">
  <h2>Garden Room Configuration</h2>
  <p><strong>Size:</strong> {length}m × {depth}m</p>
  <p><strong>Floor Area:</strong> {floor}m²</p>
  <p><strong>Wall Area:</strong> {wall}m²</p>
  <p><strong>Roof Area:</strong> {roof}m²</p>
  <p><strong>Laminated Floor:</strong> {laminated}</p>
  <p><strong>Skimmed Finish:</strong> {skimmed}</p>
  <p><strong>Ceiling Lights:</strong> {lights}</p>
  <p><strong>Double Sockets:</strong> {sockets}</p>
  <p><strong>Door Type:</strong> {door}</p>
  <p><strong>ALU Windows:</strong> {alu_windows}</p>
  <p><strong>UPVC Windows:</strong> {upvc_windows}</p>
  <p><strong>Roof Windows:</strong> {roof_windows}</p>
  <p><strong>Front Cladding:</strong> {front_cladding}</p>
  <p><strong>Side/Rear Cladding:</strong> {side_rear_cladding}</p>
</div>
<div class="section">
  <h2>Price Breakdown</h2>
  <div class="price-breakdown">
  {price_rows}
  </div>
</div>
</body>
</html>"#,
        received = Utc::now().format("%d/%m/%Y %H:%M"),
        customer_block = customer_block,
        length = config.length,
        depth = config.depth,
        floor = areas.floor,
        wall = areas.wall,
        roof = areas.roof,
        laminated = yes_no(config.laminated_floor),
        skimmed = yes_no(config.skimmed_finish),
        lights = config.ceiling_lights,
        sockets = config.double_sockets,
        door = door_label,
        alu_windows = config.alu_windows,
        upvc_windows = config.upvc_windows,
        roof_windows = config.roof_windows,
        front_cladding = front_cladding,
        side_rear_cladding = side_rear_cladding,
        price_rows = price_rows,
    )
}

fn cladding_key(config: &RoomConfiguration, front: bool) -> &'static str {
    use crate::domain::configuration::CladdingMaterial;
    let material = if front {
        config.front_cladding
    } else {
        config.side_rear_cladding
    };
    match material {
        CladdingMaterial::Composite => "composite",
        CladdingMaterial::Cedar => "cedar",
        CladdingMaterial::Metal => "metal",
        CladdingMaterial::Unknown => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::default_catalog;
    use crate::domain::configuration::{CladdingMaterial, DoorType};
    use crate::domain::pricing::calculate;
    use rust_decimal_macros::dec;

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(format_label("upvc_french_180"), "Upvc French 180");
        assert_eq!(format_label("alu_bifold_300"), "Alu Bifold 300");
        assert_eq!(format_label("cedar"), "Cedar");
    }

    #[test]
    fn rendered_document_includes_totals_and_omits_zero_options() {
        let config = RoomConfiguration {
            length: dec!(4),
            depth: dec!(3),
            laminated_floor: false,
            skimmed_finish: false,
            ceiling_lights: 2,
            double_sockets: 2,
            door_type: DoorType::UpvcFrench180,
            alu_windows: 0,
            upvc_windows: 0,
            roof_windows: 0,
            front_cladding: CladdingMaterial::Cedar,
            side_rear_cladding: CladdingMaterial::Metal,
        };
        let quote = calculate(&config, &default_catalog());
        let enquiry = CreateEnquiryRequest {
            customer_name: "Jo Bloggs".into(),
            customer_email: "jo@example.com".into(),
            customer_phone: None,
            message: None,
            configuration: config,
            price_breakdown: quote.breakdown,
            request_survey: false,
        };

        let html = render_enquiry_html(&enquiry, &quote.areas);
        assert!(html.contains("Jo Bloggs"));
        assert!(html.contains("Upvc French 180"));
        assert!(html.contains("Side/Rear Cladding:</strong> Metal"));
        assert!(html.contains(&format!("TOTAL (inc VAT):</span><span>£{}", quote.breakdown.total)));
        // Zero-valued optional buckets stay out of the document.
        assert!(!html.contains("Laminated Flooring"));
        assert!(!html.contains("Windows:</span>"));
    }
}
