//! Field-level validation for student and course input.
//!
//! # Responsibility
//! - Check raw input against field constraints before it reaches services.
//! - Report every violation at once instead of stopping at the first.
//!
//! # Invariants
//! - Rules operate on trimmed values; callers persist the trimmed form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MAX_CHARS: usize = 50;
pub const SURNAME_MAX_CHARS: usize = 50;
pub const SCHOOL_NUMBER_MIN_CHARS: usize = 5;
pub const SCHOOL_NUMBER_MAX_CHARS: usize = 50;
pub const STUDENT_CLASS_MAX_CHARS: usize = 50;
pub const COURSE_NAME_MAX_CHARS: usize = 50;

static SCHOOL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid school number regex"));

/// One failed constraint on one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Non-empty list of violations collected for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Returns whether any violation targets `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|violation| violation.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|violation| format!("{}: {}", violation.field, violation.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid input: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Accumulates violations across several field checks.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Required text with an inclusive char-length range.
    pub(crate) fn required(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        if value.is_empty() {
            self.push(field, format!("{field} is required"));
            return;
        }
        self.length(field, value, min, max);
    }

    /// Optional text: absent is fine, present-but-blank is not.
    pub(crate) fn optional(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) {
        if let Some(value) = value {
            if value.is_empty() {
                self.push(field, format!("{field} must not be blank when provided"));
                return;
            }
            self.length(field, value, min, max);
        }
    }

    pub(crate) fn school_number(&mut self, value: &str) {
        if !value.is_empty() && !SCHOOL_NUMBER_RE.is_match(value) {
            self.push(
                "school_number",
                "school_number may only contain letters, digits and `-`".to_string(),
            );
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.violations))
        }
    }

    fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let count = value.chars().count();
        if count < min || count > max {
            self.push(
                field,
                format!("{field} must be between {min} and {max} characters, got {count}"),
            );
        }
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.violations.push(Violation { field, message });
    }
}
