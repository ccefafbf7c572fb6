//! In-memory implementation of the campus repository traits.
//!
//! Mirrors the SQLite semantics (id assignment, unique columns, cascade on
//! delete) so services can be exercised without a database.

use crate::model::course::{Course, CourseDraft, CourseId};
use crate::model::student::{Student, StudentDraft, StudentId};
use crate::repo::course_repo::CourseRepository;
use crate::repo::enrollment_repo::EnrollmentRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::{RepoError, RepoResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct State {
    students: BTreeMap<StudentId, Student>,
    courses: BTreeMap<CourseId, Course>,
    last_student_id: StudentId,
    last_course_id: CourseId,
}

/// Single-threaded in-memory campus store.
#[derive(Debug, Default)]
pub struct InMemoryCampusRepository {
    state: RefCell<State>,
}

impl InMemoryCampusRepository {
    /// Creates an empty store. The first assigned ids are `1`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StudentRepository for InMemoryCampusRepository {
    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        Ok(self.state.borrow().students.get(&id).cloned())
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        Ok(self.state.borrow().students.values().cloned().collect())
    }

    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<Student> {
        let mut state = self.state.borrow_mut();
        if state
            .students
            .values()
            .any(|existing| existing.school_number == draft.school_number())
        {
            return Err(RepoError::UniqueViolation {
                table: "students",
                column: "school_number",
            });
        }

        state.last_student_id += 1;
        let student = Student::new(state.last_student_id, draft);
        state.students.insert(student.id, student.clone());
        Ok(student)
    }

    fn update_student(&self, student: &Student) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if state.students.values().any(|existing| {
            existing.id != student.id && existing.school_number == student.school_number
        }) {
            return Err(RepoError::UniqueViolation {
                table: "students",
                column: "school_number",
            });
        }

        let stored = state
            .students
            .get_mut(&student.id)
            .ok_or(RepoError::StudentNotFound(student.id))?;
        stored.name = student.name.clone();
        stored.surname = student.surname.clone();
        stored.school_number = student.school_number.clone();
        stored.student_class = student.student_class.clone();
        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        let removed = state
            .students
            .remove(&id)
            .ok_or(RepoError::StudentNotFound(id))?;
        for course_id in removed.course_ids() {
            if let Some(course) = state.courses.get_mut(course_id) {
                course.detach_student(id);
            }
        }
        Ok(())
    }

    fn student_id_by_school_number(&self, school_number: &str) -> RepoResult<Option<StudentId>> {
        Ok(self
            .state
            .borrow()
            .students
            .values()
            .find(|student| student.school_number == school_number)
            .map(|student| student.id))
    }

    fn find_students_without_courses(&self) -> RepoResult<Vec<Student>> {
        Ok(self
            .state
            .borrow()
            .students
            .values()
            .filter(|student| student.course_ids().is_empty())
            .cloned()
            .collect())
    }
}

impl CourseRepository for InMemoryCampusRepository {
    fn find_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        Ok(self.state.borrow().courses.get(&id).cloned())
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        Ok(self.state.borrow().courses.values().cloned().collect())
    }

    fn insert_course(&self, draft: &CourseDraft) -> RepoResult<Course> {
        let mut state = self.state.borrow_mut();
        if state
            .courses
            .values()
            .any(|existing| existing.name == draft.name())
        {
            return Err(RepoError::UniqueViolation {
                table: "courses",
                column: "name",
            });
        }

        state.last_course_id += 1;
        let course = Course::new(state.last_course_id, draft);
        state.courses.insert(course.id, course.clone());
        Ok(course)
    }

    fn update_course(&self, course: &Course) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if state
            .courses
            .values()
            .any(|existing| existing.id != course.id && existing.name == course.name)
        {
            return Err(RepoError::UniqueViolation {
                table: "courses",
                column: "name",
            });
        }

        let stored = state
            .courses
            .get_mut(&course.id)
            .ok_or(RepoError::CourseNotFound(course.id))?;
        stored.name = course.name.clone();
        Ok(())
    }

    fn delete_course(&self, id: CourseId) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        let removed = state
            .courses
            .remove(&id)
            .ok_or(RepoError::CourseNotFound(id))?;
        for student_id in removed.student_ids() {
            if let Some(student) = state.students.get_mut(student_id) {
                student.detach_course(id);
            }
        }
        Ok(())
    }

    fn course_id_by_name(&self, name: &str) -> RepoResult<Option<CourseId>> {
        Ok(self
            .state
            .borrow()
            .courses
            .values()
            .find(|course| course.name == name)
            .map(|course| course.id))
    }

    fn find_courses_without_students(&self) -> RepoResult<Vec<Course>> {
        Ok(self
            .state
            .borrow()
            .courses
            .values()
            .filter(|course| course.student_ids().is_empty())
            .cloned()
            .collect())
    }
}

impl EnrollmentRepository for InMemoryCampusRepository {
    fn save_enrollment(&self, student: &Student, course: &Course) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.students.contains_key(&student.id) {
            return Err(RepoError::StudentNotFound(student.id));
        }
        if !state.courses.contains_key(&course.id) {
            return Err(RepoError::CourseNotFound(course.id));
        }

        if let Some(stored) = state.students.get_mut(&student.id) {
            stored.attach_course(course.id);
        }
        if let Some(stored) = state.courses.get_mut(&course.id) {
            stored.attach_student(student.id);
        }
        Ok(())
    }
}
