//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep handler layers decoupled from storage details.

pub mod course_service;
pub mod enrollment_service;
pub mod error;
pub mod query_service;
pub mod student_service;
