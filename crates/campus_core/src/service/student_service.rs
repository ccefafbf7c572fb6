//! Student CRUD use-case service.
//!
//! # Responsibility
//! - Create, update, fetch and delete student records.
//! - Enforce school-number uniqueness ahead of persistence.
//!
//! # Invariants
//! - Input arrives as a validated `StudentDraft`.
//! - Deleting a student clears its enrollments (storage cascades).
//! - Membership sets are never written here.

use crate::model::student::{Student, StudentDraft, StudentId};
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoError;
use crate::service::error::{ConflictKind, NotFoundTarget, ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one student by id.
    pub fn get_student(&self, id: StudentId) -> ServiceResult<Student> {
        self.repo
            .find_student(id)?
            .ok_or(ServiceError::NotFound(NotFoundTarget::Student(id)))
    }

    /// Creates a student after checking the school number is free.
    ///
    /// # Errors
    /// - `Conflict(DuplicateSchoolNumber)` when another student owns the
    ///   school number, including when a concurrent writer wins the race and
    ///   storage rejects the insert.
    pub fn create_student(&self, draft: &StudentDraft) -> ServiceResult<Student> {
        if self.repo.exists_by_school_number(draft.school_number())? {
            warn!("event=student_create module=service status=conflict reason=duplicate_school_number");
            return Err(duplicate_school_number(draft));
        }

        let student = self.repo.insert_student(draft).map_err(|err| match err {
            RepoError::UniqueViolation { .. } => duplicate_school_number(draft),
            other => other.into(),
        })?;
        info!(
            "event=student_create module=service status=ok student_id={}",
            student.id
        );
        Ok(student)
    }

    /// Overwrites every profile field of an existing student.
    ///
    /// The school number may stay the same; moving it onto a number owned by
    /// another student is a conflict.
    pub fn update_student(&self, id: StudentId, draft: &StudentDraft) -> ServiceResult<Student> {
        let mut student = self.get_student(id)?;

        if let Some(owner) = self.repo.student_id_by_school_number(draft.school_number())? {
            if owner != id {
                warn!(
                    "event=student_update module=service status=conflict student_id={} reason=duplicate_school_number",
                    id
                );
                return Err(duplicate_school_number(draft));
            }
        }

        student.apply(draft);
        self.repo.update_student(&student).map_err(|err| match err {
            RepoError::UniqueViolation { .. } => duplicate_school_number(draft),
            other => other.into(),
        })?;
        info!("event=student_update module=service status=ok student_id={id}");
        Ok(student)
    }

    /// Deletes a student and its enrollments.
    pub fn delete_student(&self, id: StudentId) -> ServiceResult<()> {
        let student = self.get_student(id)?;
        self.repo.delete_student(student.id)?;
        info!(
            "event=student_delete module=service status=ok student_id={} cleared_enrollments={}",
            id,
            student.course_count()
        );
        Ok(())
    }
}

fn duplicate_school_number(draft: &StudentDraft) -> ServiceError {
    ServiceError::Conflict(ConflictKind::DuplicateSchoolNumber(
        draft.school_number().to_string(),
    ))
}
