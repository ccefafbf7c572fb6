//! Course CRUD use-case service.
//!
//! # Invariants
//! - Input arrives as a validated `CourseDraft`.
//! - Course names are unique; checked before every write.
//! - Deleting a course clears its enrollments (storage cascades).

use crate::model::course::{Course, CourseDraft, CourseId};
use crate::repo::course_repo::CourseRepository;
use crate::repo::RepoError;
use crate::service::error::{ConflictKind, NotFoundTarget, ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service wrapper for course CRUD operations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one course by id.
    pub fn get_course(&self, id: CourseId) -> ServiceResult<Course> {
        self.repo
            .find_course(id)?
            .ok_or(ServiceError::NotFound(NotFoundTarget::Course(id)))
    }

    /// Creates a course after checking the name is free.
    pub fn create_course(&self, draft: &CourseDraft) -> ServiceResult<Course> {
        if self.repo.exists_by_name(draft.name())? {
            warn!("event=course_create module=service status=conflict reason=duplicate_name");
            return Err(duplicate_name(draft));
        }

        let course = self.repo.insert_course(draft).map_err(|err| match err {
            RepoError::UniqueViolation { .. } => duplicate_name(draft),
            other => other.into(),
        })?;
        info!(
            "event=course_create module=service status=ok course_id={}",
            course.id
        );
        Ok(course)
    }

    /// Renames an existing course.
    pub fn update_course(&self, id: CourseId, draft: &CourseDraft) -> ServiceResult<Course> {
        let mut course = self.get_course(id)?;

        if let Some(owner) = self.repo.course_id_by_name(draft.name())? {
            if owner != id {
                warn!(
                    "event=course_update module=service status=conflict course_id={} reason=duplicate_name",
                    id
                );
                return Err(duplicate_name(draft));
            }
        }

        course.apply(draft);
        self.repo.update_course(&course).map_err(|err| match err {
            RepoError::UniqueViolation { .. } => duplicate_name(draft),
            other => other.into(),
        })?;
        info!("event=course_update module=service status=ok course_id={id}");
        Ok(course)
    }

    /// Deletes a course and its enrollments.
    pub fn delete_course(&self, id: CourseId) -> ServiceResult<()> {
        let course = self.get_course(id)?;
        self.repo.delete_course(course.id)?;
        info!(
            "event=course_delete module=service status=ok course_id={} cleared_enrollments={}",
            id,
            course.student_count()
        );
        Ok(())
    }
}

fn duplicate_name(draft: &CourseDraft) -> ServiceError {
    ServiceError::Conflict(ConflictKind::DuplicateCourseName(draft.name().to_string()))
}
