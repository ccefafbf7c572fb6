//! Enrollment use-case service.
//!
//! # Responsibility
//! - Link a student to a course while enforcing relationship invariants.
//! - Be the only code path that mutates membership sets.
//!
//! # Invariants
//! - Both sides of a link are updated together and persisted in one
//!   repository call.
//! - Check order is fixed: student lookup, course lookup, duplicate link,
//!   student capacity, course capacity. The first failing check wins.
//! - There is no unenroll operation; links are removed only by deleting
//!   one of the linked records.
//!
//! # Concurrency
//! - Checks run against records loaded at call time. Two writers on
//!   separate connections can both pass the capacity check before either
//!   persists; storage only guarantees the pair itself is never duplicated.

use crate::model::course::CourseId;
use crate::model::enrollment::{
    CapacityLimit, Enrollment, MAX_COURSES_PER_STUDENT, MAX_STUDENTS_PER_COURSE,
};
use crate::model::student::StudentId;
use crate::repo::enrollment_repo::EnrollmentRepository;
use crate::service::error::{ConflictKind, NotFoundTarget, ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service for student/course enrollment.
pub struct EnrollmentService<R: EnrollmentRepository> {
    repo: R,
}

impl<R: EnrollmentRepository> EnrollmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Enrolls `student_id` into `course_id`.
    ///
    /// # Errors
    /// - `NotFound(Student)` / `NotFound(Course)` for unresolved ids, student
    ///   checked first.
    /// - `Conflict(DuplicateEnrollment)` when the pair is already linked.
    /// - `Conflict(CapacityExceeded(CoursesPerStudent))` when the student
    ///   already holds the maximum number of courses.
    /// - `Conflict(CapacityExceeded(StudentsPerCourse))` when the course is
    ///   full. Only reported once the student side has room.
    pub fn enroll(&self, student_id: StudentId, course_id: CourseId) -> ServiceResult<Enrollment> {
        let mut student = self
            .repo
            .find_student(student_id)?
            .ok_or(ServiceError::NotFound(NotFoundTarget::Student(student_id)))?;
        let mut course = self
            .repo
            .find_course(course_id)?
            .ok_or(ServiceError::NotFound(NotFoundTarget::Course(course_id)))?;

        if student.is_enrolled_in(course_id) || course.has_student(student_id) {
            return Err(self.rejected(
                student_id,
                course_id,
                ConflictKind::DuplicateEnrollment {
                    student_id,
                    course_id,
                },
            ));
        }
        if student.course_count() >= MAX_COURSES_PER_STUDENT {
            return Err(self.rejected(
                student_id,
                course_id,
                ConflictKind::CapacityExceeded(CapacityLimit::CoursesPerStudent),
            ));
        }
        if course.student_count() >= MAX_STUDENTS_PER_COURSE {
            return Err(self.rejected(
                student_id,
                course_id,
                ConflictKind::CapacityExceeded(CapacityLimit::StudentsPerCourse),
            ));
        }

        course.attach_student(student_id);
        student.attach_course(course_id);
        self.repo.save_enrollment(&student, &course)?;

        info!(
            "event=enroll module=service status=ok student_id={} course_id={} student_courses={} course_students={}",
            student_id,
            course_id,
            student.course_count(),
            course.student_count()
        );
        Ok(Enrollment {
            student_id,
            course_id,
        })
    }

    fn rejected(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        kind: ConflictKind,
    ) -> ServiceError {
        warn!(
            "event=enroll module=service status=conflict student_id={} course_id={} reason={}",
            student_id, course_id, kind
        );
        ServiceError::Conflict(kind)
    }
}
