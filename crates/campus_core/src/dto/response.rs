//! Response DTOs and entity-to-response mapping.

use crate::model::course::{Course, CourseId};
use crate::model::enrollment::Enrollment;
use crate::model::student::{Student, StudentId};
use crate::service::query_service::StudentCourseSummary;
use serde::{Deserialize, Serialize};

pub const CREATED_MESSAGE: &str = "created successfully";
pub const UPDATED_MESSAGE: &str = "updated successfully";
pub const DELETED_MESSAGE: &str = "deleted successfully";
pub const ENROLLED_MESSAGE: &str = "enrolled successfully";

/// Student shape returned to callers. Memberships are not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: StudentId,
    pub name: String,
    pub surname: String,
    pub school_number: String,
    pub student_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: CourseId,
    pub name: String,
}

/// Student row plus comma-joined course names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCoursesResponse {
    pub id: StudentId,
    pub name: String,
    pub surname: String,
    pub school_number: String,
    pub courses: String,
}

/// Outcome envelope for write requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    /// Id of the created or affected record, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl ActionResponse {
    pub fn success(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id,
        }
    }
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            surname: student.surname.clone(),
            school_number: student.school_number.clone(),
            student_class: student.student_class.clone(),
        }
    }
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
        }
    }
}

impl From<&StudentCourseSummary> for StudentCoursesResponse {
    fn from(summary: &StudentCourseSummary) -> Self {
        Self {
            id: summary.student.id,
            name: summary.student.name.clone(),
            surname: summary.student.surname.clone(),
            school_number: summary.student.school_number.clone(),
            courses: summary.course_names.clone(),
        }
    }
}

impl From<&Enrollment> for ActionResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self::success(
            format!(
                "student {} {ENROLLED_MESSAGE} in course {}",
                enrollment.student_id, enrollment.course_id
            ),
            None,
        )
    }
}

pub fn students_to_responses(students: &[Student]) -> Vec<StudentResponse> {
    students.iter().map(StudentResponse::from).collect()
}

pub fn courses_to_responses(courses: &[Course]) -> Vec<CourseResponse> {
    courses.iter().map(CourseResponse::from).collect()
}

pub fn summaries_to_responses(summaries: &[StudentCourseSummary]) -> Vec<StudentCoursesResponse> {
    summaries.iter().map(StudentCoursesResponse::from).collect()
}
