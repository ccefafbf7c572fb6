//! Core domain logic for the campus enrollment backend.
//! This crate is the single source of truth for enrollment invariants.

pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dto::request::{CourseRequest, StudentRequest};
pub use dto::response::{
    ActionResponse, CourseResponse, StudentCoursesResponse, StudentResponse,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{Course, CourseDraft, CourseId};
pub use model::enrollment::{
    CapacityLimit, Enrollment, MAX_COURSES_PER_STUDENT, MAX_STUDENTS_PER_COURSE,
};
pub use model::student::{Student, StudentDraft, StudentId};
pub use model::validation::{ValidationErrors, Violation};
pub use repo::course_repo::CourseRepository;
pub use repo::enrollment_repo::EnrollmentRepository;
pub use repo::in_memory::InMemoryCampusRepository;
pub use repo::sqlite::SqliteCampusRepository;
pub use repo::student_repo::StudentRepository;
pub use repo::{RepoError, RepoResult};
pub use service::course_service::CourseService;
pub use service::enrollment_service::EnrollmentService;
pub use service::error::{ConflictKind, NotFoundTarget, ServiceError, ServiceResult};
pub use service::query_service::{QueryService, StudentCourseSummary};
pub use service::student_service::StudentService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
