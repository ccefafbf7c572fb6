//! Enrollment relationship limits and result records.

use crate::model::course::CourseId;
use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Maximum number of courses one student may be enrolled in.
pub const MAX_COURSES_PER_STUDENT: usize = 5;
/// Maximum number of students one course may hold.
pub const MAX_STUDENTS_PER_COURSE: usize = 50;

/// Which side of the relationship ran out of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityLimit {
    /// Student already holds `MAX_COURSES_PER_STUDENT` courses.
    CoursesPerStudent,
    /// Course already holds `MAX_STUDENTS_PER_COURSE` students.
    StudentsPerCourse,
}

impl CapacityLimit {
    pub fn max(self) -> usize {
        match self {
            Self::CoursesPerStudent => MAX_COURSES_PER_STUDENT,
            Self::StudentsPerCourse => MAX_STUDENTS_PER_COURSE,
        }
    }

    /// Entity kind being counted against the limit.
    pub fn counted(self) -> &'static str {
        match self {
            Self::CoursesPerStudent => "course",
            Self::StudentsPerCourse => "student",
        }
    }
}

impl Display for CapacityLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "maximum number of {} registrations ({}) reached",
            self.counted(),
            self.max()
        )
    }
}

/// A successfully created student/course link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
}
