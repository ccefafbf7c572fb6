//! Course domain model.
//!
//! # Invariants
//! - `name` is unique across all courses.
//! - `student_ids` holds at most `MAX_STUDENTS_PER_COURSE` entries.

use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage-assigned course identifier.
pub type CourseId = i64;

/// Fully loaded course record, including its enrolled student ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    student_ids: BTreeSet<StudentId>,
}

impl Course {
    /// Builds a course record with an empty student set.
    pub fn new(id: CourseId, draft: &CourseDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            student_ids: BTreeSet::new(),
        }
    }

    pub(crate) fn with_student_ids(mut self, student_ids: BTreeSet<StudentId>) -> Self {
        self.student_ids = student_ids;
        self
    }

    /// Ids of the enrolled students, ascending.
    pub fn student_ids(&self) -> &BTreeSet<StudentId> {
        &self.student_ids
    }

    pub fn has_student(&self, student_id: StudentId) -> bool {
        self.student_ids.contains(&student_id)
    }

    pub fn student_count(&self) -> usize {
        self.student_ids.len()
    }

    pub fn apply(&mut self, draft: &CourseDraft) {
        self.name = draft.name.clone();
    }

    pub(crate) fn attach_student(&mut self, student_id: StudentId) -> bool {
        self.student_ids.insert(student_id)
    }

    pub(crate) fn detach_student(&mut self, student_id: StudentId) -> bool {
        self.student_ids.remove(&student_id)
    }
}

/// Validated course input. Built by `CourseRequest::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub(crate) name: String,
}

impl CourseDraft {
    pub fn name(&self) -> &str {
        &self.name
    }
}
