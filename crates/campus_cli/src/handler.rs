//! Request handlers: command in, JSON document out.
//!
//! # Responsibility
//! - Validate request input before any service call.
//! - Map service results onto response DTOs and service errors onto an
//!   error envelope with an HTTP-style status code.
//!
//! # Invariants
//! - Handlers never touch SQL; all work goes through core services.

use crate::args::{CourseCommands, StudentCommands};
use campus_core::db::migrations::latest_version;
use campus_core::dto::response::{
    courses_to_responses, students_to_responses, summaries_to_responses, CREATED_MESSAGE,
    DELETED_MESSAGE, UPDATED_MESSAGE,
};
use campus_core::{
    core_version, ActionResponse, CourseRequest, CourseResponse, CourseService,
    EnrollmentService, QueryService, ServiceError, SqliteCampusRepository, StudentRequest,
    StudentResponse, StudentService, Violation,
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

pub type HandlerResult = Result<Value, ErrorResponse>;

/// Error envelope printed for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        let violations = match &err {
            ServiceError::Validation(errors) => errors.violations().to_vec(),
            _ => Vec::new(),
        };
        Self {
            status: status_code(&err),
            error: err.code(),
            message: err.to_string(),
            violations,
        }
    }
}

/// HTTP-style status for each service error kind.
pub fn status_code(err: &ServiceError) -> u16 {
    match err {
        ServiceError::Validation(_) => 400,
        ServiceError::NotFound(_) => 404,
        ServiceError::Conflict(_) => 409,
        ServiceError::Repo(_) => 500,
    }
}

pub fn handle_student(conn: &Connection, command: &StudentCommands) -> HandlerResult {
    let repo = repository(conn)?;
    let students = StudentService::new(repo);
    let queries = QueryService::new(repo);

    match command {
        StudentCommands::List => to_json(&students_to_responses(&queries.list_students()?)),
        StudentCommands::Get { id } => to_json(&StudentResponse::from(&students.get_student(*id)?)),
        StudentCommands::Create(fields) => {
            let draft = StudentRequest::from(fields)
                .validate()
                .map_err(ServiceError::from)?;
            let created = students.create_student(&draft)?;
            to_json(&ActionResponse::success(CREATED_MESSAGE, Some(created.id)))
        }
        StudentCommands::Update { id, fields } => {
            let draft = StudentRequest::from(fields)
                .validate()
                .map_err(ServiceError::from)?;
            let updated = students.update_student(*id, &draft)?;
            to_json(&ActionResponse::success(UPDATED_MESSAGE, Some(updated.id)))
        }
        StudentCommands::Delete { id } => {
            students.delete_student(*id)?;
            to_json(&ActionResponse::success(DELETED_MESSAGE, Some(*id)))
        }
        StudentCommands::WithoutCourses => {
            to_json(&students_to_responses(&queries.students_without_courses()?))
        }
        StudentCommands::WithCourses => to_json(&summaries_to_responses(
            &queries.students_with_course_summary()?,
        )),
        StudentCommands::Courses { id } => {
            to_json(&courses_to_responses(&queries.courses_for_student(*id)?))
        }
    }
}

pub fn handle_course(conn: &Connection, command: &CourseCommands) -> HandlerResult {
    let repo = repository(conn)?;
    let courses = CourseService::new(repo);
    let queries = QueryService::new(repo);

    match command {
        CourseCommands::List => to_json(&courses_to_responses(&queries.list_courses()?)),
        CourseCommands::Get { id } => to_json(&CourseResponse::from(&courses.get_course(*id)?)),
        CourseCommands::Create(fields) => {
            let draft = CourseRequest::from(fields)
                .validate()
                .map_err(ServiceError::from)?;
            let created = courses.create_course(&draft)?;
            to_json(&ActionResponse::success(CREATED_MESSAGE, Some(created.id)))
        }
        CourseCommands::Update { id, fields } => {
            let draft = CourseRequest::from(fields)
                .validate()
                .map_err(ServiceError::from)?;
            let updated = courses.update_course(*id, &draft)?;
            to_json(&ActionResponse::success(UPDATED_MESSAGE, Some(updated.id)))
        }
        CourseCommands::Delete { id } => {
            courses.delete_course(*id)?;
            to_json(&ActionResponse::success(DELETED_MESSAGE, Some(*id)))
        }
        CourseCommands::WithoutStudents => {
            to_json(&courses_to_responses(&queries.courses_without_students()?))
        }
        CourseCommands::Students { id } => {
            to_json(&students_to_responses(&queries.students_for_course(*id)?))
        }
        CourseCommands::Enroll {
            student_id,
            course_id,
        } => {
            let enrollment = EnrollmentService::new(repo).enroll(*student_id, *course_id)?;
            to_json(&ActionResponse::from(&enrollment))
        }
    }
}

pub fn handle_info() -> HandlerResult {
    Ok(serde_json::json!({
        "core_version": core_version(),
        "schema_version": latest_version(),
    }))
}

fn repository(conn: &Connection) -> Result<SqliteCampusRepository<'_>, ErrorResponse> {
    SqliteCampusRepository::try_new(conn).map_err(|err| ServiceError::from(err).into())
}

fn to_json<T: Serialize>(value: &T) -> HandlerResult {
    serde_json::to_value(value).map_err(|err| ErrorResponse {
        status: 500,
        error: "serialization_failed",
        message: err.to_string(),
        violations: Vec::new(),
    })
}
