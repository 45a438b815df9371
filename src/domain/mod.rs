//! Domain types and the pricing core
//!
//! Everything here is pure: no I/O, no clocks, no shared state. The HTTP
//! shell feeds these functions a configuration and a catalog snapshot and
//! renders whatever comes back.

#![allow(dead_code)]

pub mod catalog;
pub mod configuration;
pub mod geometry;
pub mod pricing;
pub mod quote;

pub use catalog::{PriceCatalog, PriceKey};
pub use configuration::{CladdingMaterial, DoorType, RoomConfiguration};
pub use geometry::Areas;
pub use pricing::{calculate, PriceBreakdown, Quotation};
pub use quote::{QuoteRecord, QuoteStatus};
