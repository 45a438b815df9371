//! Price list persistence
//!
//! Storage access for the editable price list. The pricing engine never
//! touches the database: callers load an immutable [`PriceCatalog`] snapshot
//! here at the start of each calculation and hand it over by reference.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::catalog::{PriceCatalog, DEFAULT_PRICE_LIST};

/// One row of the price list as stored, including the descriptive metadata
/// the calculation does not use.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PriceListRow {
    pub category: String,
    pub item: String,
    pub price: Decimal,
    pub unit: Option<String>,
    pub description: Option<String>,
}

/// Load a fresh catalog snapshot. Rows for (category, item) pairs the engine
/// has no formula for are skipped by the snapshot builder.
pub async fn load_catalog(db: &PgPool) -> Result<PriceCatalog, sqlx::Error> {
    let rows: Vec<(String, String, Decimal)> =
        sqlx::query_as("SELECT category, item, price FROM price_list")
            .fetch_all(db)
            .await?;

    Ok(PriceCatalog::from_rows(
        rows.iter()
            .map(|(category, item, price)| (category.as_str(), item.as_str(), *price)),
    ))
}

/// List the full price list with metadata, for the admin catalog view.
pub async fn list_entries(db: &PgPool) -> Result<Vec<PriceListRow>, sqlx::Error> {
    sqlx::query_as::<_, PriceListRow>(
        "SELECT category, item, price, unit, description FROM price_list ORDER BY category, item",
    )
    .fetch_all(db)
    .await
}

/// Upsert one price. Unknown (category, item) pairs are stored as-is; they
/// only become effective if a later release adds a formula for them.
pub async fn set_price(
    db: &PgPool,
    category: &str,
    item: &str,
    price: Decimal,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO price_list (category, item, price)
        VALUES ($1, $2, $3)
        ON CONFLICT (category, item) DO UPDATE SET price = EXCLUDED.price
        "#,
    )
    .bind(category)
    .bind(item)
    .bind(price)
    .execute(db)
    .await?;

    tracing::info!(category, item, price = %price, "Price list entry updated");

    Ok(())
}

/// Seed the launch price list if the table is empty. Safe to call on every
/// startup; an already-populated table is left untouched.
pub async fn seed_defaults(db: &PgPool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM price_list")
        .fetch_one(db)
        .await?;

    if count > 0 {
        tracing::debug!(rows = count, "Price list already populated, skipping seed");
        return Ok(());
    }

    for entry in DEFAULT_PRICE_LIST {
        sqlx::query(
            r#"
            INSERT INTO price_list (category, item, price, unit, description)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (category, item) DO NOTHING
            "#,
        )
        .bind(entry.key.category())
        .bind(entry.key.item())
        .bind(entry.price)
        .bind(entry.unit)
        .bind(entry.description)
        .execute(db)
        .await?;
    }

    tracing::info!(rows = DEFAULT_PRICE_LIST.len(), "Seeded default price list");

    Ok(())
}
