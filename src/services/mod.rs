//! Service layer modules for persistence and external integrations.
//!
//! Contains the price list store and the mail provider client.

pub mod catalog_store;
pub mod mailer;

pub use mailer::Mailer;
