//! Student domain model.
//!
//! # Responsibility
//! - Hold student profile fields and the set of enrolled course ids.
//! - Carry validated input (`StudentDraft`) from the boundary into services.
//!
//! # Invariants
//! - `school_number` is unique across all students.
//! - `course_ids` holds at most `MAX_COURSES_PER_STUDENT` entries.

use crate::model::course::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage-assigned student identifier.
pub type StudentId = i64;

/// Fully loaded student record, including its enrolled course ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub surname: String,
    pub school_number: String,
    /// Class label, e.g. `10-B`. Optional.
    pub student_class: Option<String>,
    course_ids: BTreeSet<CourseId>,
}

impl Student {
    /// Builds a student record with an empty course set.
    pub fn new(id: StudentId, draft: &StudentDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            surname: draft.surname.clone(),
            school_number: draft.school_number.clone(),
            student_class: draft.student_class.clone(),
            course_ids: BTreeSet::new(),
        }
    }

    /// Replaces the membership set. Used by repositories when loading rows.
    pub(crate) fn with_course_ids(mut self, course_ids: BTreeSet<CourseId>) -> Self {
        self.course_ids = course_ids;
        self
    }

    /// Ids of the courses this student is enrolled in, ascending.
    pub fn course_ids(&self) -> &BTreeSet<CourseId> {
        &self.course_ids
    }

    pub fn is_enrolled_in(&self, course_id: CourseId) -> bool {
        self.course_ids.contains(&course_id)
    }

    pub fn course_count(&self) -> usize {
        self.course_ids.len()
    }

    /// Overwrites every mutable profile field. Memberships are untouched.
    pub fn apply(&mut self, draft: &StudentDraft) {
        self.name = draft.name.clone();
        self.surname = draft.surname.clone();
        self.school_number = draft.school_number.clone();
        self.student_class = draft.student_class.clone();
    }

    pub(crate) fn attach_course(&mut self, course_id: CourseId) -> bool {
        self.course_ids.insert(course_id)
    }

    pub(crate) fn detach_course(&mut self, course_id: CourseId) -> bool {
        self.course_ids.remove(&course_id)
    }
}

/// Validated student input.
///
/// Only constructible through `StudentRequest::validate`, so services never
/// see unchecked field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) school_number: String,
    pub(crate) student_class: Option<String>,
}

impl StudentDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn school_number(&self) -> &str {
        &self.school_number
    }

    pub fn student_class(&self) -> Option<&str> {
        self.student_class.as_deref()
    }
}
