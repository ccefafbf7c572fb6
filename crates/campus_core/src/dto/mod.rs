//! Transport-facing request and response shapes.
//!
//! # Responsibility
//! - Validate raw request input into drafts the services accept.
//! - Map loaded records into response shapes; mapping is pure.

pub mod request;
pub mod response;
