//! Service-level error taxonomy.
//!
//! Every variant is a per-request, recoverable outcome. Handlers map the
//! kind (`NotFound`, `Conflict`, `Validation`, `Repo`) onto transport status.

use crate::model::course::CourseId;
use crate::model::enrollment::CapacityLimit;
use crate::model::student::StudentId;
use crate::model::validation::ValidationErrors;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// What a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundTarget {
    Student(StudentId),
    Course(CourseId),
    /// Student exists but holds no course.
    CoursesForStudent(StudentId),
    /// Course exists but holds no student.
    StudentsForCourse(CourseId),
}

impl Display for NotFoundTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student(id) => write!(f, "student with id {id} not found"),
            Self::Course(id) => write!(f, "course with id {id} not found"),
            Self::CoursesForStudent(id) => write!(f, "no course found for student {id}"),
            Self::StudentsForCourse(id) => write!(f, "no student found for course {id}"),
        }
    }
}

/// Why a write was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    DuplicateSchoolNumber(String),
    DuplicateCourseName(String),
    DuplicateEnrollment {
        student_id: StudentId,
        course_id: CourseId,
    },
    CapacityExceeded(CapacityLimit),
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateSchoolNumber(value) => {
                write!(f, "there is already a record with the school number {value}")
            }
            Self::DuplicateCourseName(value) => {
                write!(f, "there is already a record with the name {value}")
            }
            Self::DuplicateEnrollment {
                student_id,
                course_id,
            } => write!(
                f,
                "student {student_id} is already enrolled in course {course_id}"
            ),
            Self::CapacityExceeded(limit) => write!(f, "{limit}"),
        }
    }
}

/// Error returned by every campus service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed field validation.
    Validation(ValidationErrors),
    /// Requested entity or association does not resolve.
    NotFound(NotFoundTarget),
    /// Operation would break a uniqueness or enrollment invariant.
    Conflict(ConflictKind),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Stable machine-readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
            Self::Conflict(ConflictKind::DuplicateSchoolNumber(_))
            | Self::Conflict(ConflictKind::DuplicateCourseName(_)) => "duplicate_unique_field",
            Self::Conflict(ConflictKind::DuplicateEnrollment { .. }) => "duplicate_enrollment",
            Self::Conflict(ConflictKind::CapacityExceeded(_)) => "capacity_exceeded",
            Self::Repo(_) => "storage_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "{target}"),
            Self::Conflict(kind) => write!(f, "{kind}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::StudentNotFound(id) => Self::NotFound(NotFoundTarget::Student(id)),
            RepoError::CourseNotFound(id) => Self::NotFound(NotFoundTarget::Course(id)),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}
