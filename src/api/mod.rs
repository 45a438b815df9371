//! Shared API plumbing: response wrappers and pagination.

pub mod pagination;
pub mod response;
