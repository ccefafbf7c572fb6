//! Domain model for students, courses and their enrollment relationship.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep membership sets explicit on both sides of the relationship.
//!
//! # Invariants
//! - Ids are system-assigned by storage and never reused within one database.
//! - Membership sets are mutated only through the enrollment service.
//! - Deleting an entity clears its memberships on the other side.

pub mod course;
pub mod enrollment;
pub mod student;
pub mod validation;
