//! Read-only views derived from the enrollment relationship.
//!
//! # Invariants
//! - Lists are ordered by id.
//! - Per-entity association lookups treat an empty association as
//!   `NotFound`; the student/course summary treats it as an empty string.

use crate::model::course::{Course, CourseId};
use crate::model::student::{Student, StudentId};
use crate::repo::course_repo::CourseRepository;
use crate::repo::student_repo::StudentRepository;
use crate::service::error::{NotFoundTarget, ServiceError, ServiceResult};
use log::debug;
use std::collections::BTreeMap;

/// Separator used when joining course names in summaries.
pub const COURSE_NAME_SEPARATOR: &str = ", ";

/// One student together with the names of its courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentCourseSummary {
    pub student: Student,
    /// Course names in course-id order, joined by `COURSE_NAME_SEPARATOR`.
    /// Empty when the student holds no course.
    pub course_names: String,
}

/// Query facade over student and course repositories.
pub struct QueryService<R: StudentRepository + CourseRepository> {
    repo: R,
}

impl<R: StudentRepository + CourseRepository> QueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.repo.list_students()?)
    }

    pub fn list_courses(&self) -> ServiceResult<Vec<Course>> {
        Ok(self.repo.list_courses()?)
    }

    /// Students holding no course.
    pub fn students_without_courses(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.repo.find_students_without_courses()?)
    }

    /// Courses holding no student.
    pub fn courses_without_students(&self) -> ServiceResult<Vec<Course>> {
        Ok(self.repo.find_courses_without_students()?)
    }

    /// Courses the student is enrolled in, in id order.
    ///
    /// # Errors
    /// - `NotFound(Student)` when the student does not exist.
    /// - `NotFound(CoursesForStudent)` when the student holds no course.
    pub fn courses_for_student(&self, student_id: StudentId) -> ServiceResult<Vec<Course>> {
        debug!("event=courses_for_student module=service student_id={student_id}");
        let student = self
            .repo
            .find_student(student_id)?
            .ok_or(ServiceError::NotFound(NotFoundTarget::Student(student_id)))?;
        if student.course_ids().is_empty() {
            return Err(ServiceError::NotFound(NotFoundTarget::CoursesForStudent(
                student_id,
            )));
        }

        let mut courses = Vec::with_capacity(student.course_count());
        for course_id in student.course_ids() {
            let course = self
                .repo
                .find_course(*course_id)?
                .ok_or(ServiceError::NotFound(NotFoundTarget::Course(*course_id)))?;
            courses.push(course);
        }
        Ok(courses)
    }

    /// Students enrolled in the course, in id order.
    ///
    /// # Errors
    /// - `NotFound(Course)` when the course does not exist.
    /// - `NotFound(StudentsForCourse)` when the course holds no student.
    pub fn students_for_course(&self, course_id: CourseId) -> ServiceResult<Vec<Student>> {
        debug!("event=students_for_course module=service course_id={course_id}");
        let course = self
            .repo
            .find_course(course_id)?
            .ok_or(ServiceError::NotFound(NotFoundTarget::Course(course_id)))?;
        if course.student_ids().is_empty() {
            return Err(ServiceError::NotFound(NotFoundTarget::StudentsForCourse(
                course_id,
            )));
        }

        let mut students = Vec::with_capacity(course.student_count());
        for student_id in course.student_ids() {
            let student = self
                .repo
                .find_student(*student_id)?
                .ok_or(ServiceError::NotFound(NotFoundTarget::Student(*student_id)))?;
            students.push(student);
        }
        Ok(students)
    }

    /// Every student with its comma-joined course names.
    pub fn students_with_course_summary(&self) -> ServiceResult<Vec<StudentCourseSummary>> {
        let names: BTreeMap<CourseId, String> = self
            .repo
            .list_courses()?
            .into_iter()
            .map(|course| (course.id, course.name))
            .collect();

        let summaries = self
            .repo
            .list_students()?
            .into_iter()
            .map(|student| {
                let course_names = student
                    .course_ids()
                    .iter()
                    .filter_map(|course_id| names.get(course_id).map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(COURSE_NAME_SEPARATOR);
                StudentCourseSummary {
                    student,
                    course_names,
                }
            })
            .collect();
        Ok(summaries)
    }
}
