//! Student repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_students` and `find_students_without_courses` are ordered by id.
//! - Writes never touch enrollment rows; see `enrollment_repo`.

use crate::model::student::{Student, StudentDraft, StudentId};
use crate::repo::sqlite::{map_unique_violation, SqliteCampusRepository};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    surname,
    school_number,
    student_class
FROM students";

/// Repository interface for student records.
pub trait StudentRepository {
    /// Loads one student with its course ids.
    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Lists every student in id order.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Persists a new student and returns it with its assigned id.
    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<Student>;
    /// Overwrites profile fields of an existing student.
    fn update_student(&self, student: &Student) -> RepoResult<()>;
    /// Deletes a student and its enrollments.
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
    /// Returns the id of the student owning `school_number`, if any.
    fn student_id_by_school_number(&self, school_number: &str) -> RepoResult<Option<StudentId>>;
    /// Lists students that hold no course, in id order.
    fn find_students_without_courses(&self) -> RepoResult<Vec<Student>>;

    fn exists_by_school_number(&self, school_number: &str) -> RepoResult<bool> {
        Ok(self.student_id_by_school_number(school_number)?.is_some())
    }
}

impl<T: StudentRepository + ?Sized> StudentRepository for &T {
    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        (**self).find_student(id)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        (**self).list_students()
    }

    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<Student> {
        (**self).insert_student(draft)
    }

    fn update_student(&self, student: &Student) -> RepoResult<()> {
        (**self).update_student(student)
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        (**self).delete_student(id)
    }

    fn student_id_by_school_number(&self, school_number: &str) -> RepoResult<Option<StudentId>> {
        (**self).student_id_by_school_number(school_number)
    }

    fn find_students_without_courses(&self) -> RepoResult<Vec<Student>> {
        (**self).find_students_without_courses()
    }
}

impl StudentRepository for SqliteCampusRepository<'_> {
    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let student = self
            .conn()
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_student_row,
            )
            .optional()?;

        match student {
            Some(student) => {
                let course_ids = self.course_ids_for_student(student.id)?;
                Ok(Some(student.with_course_ids(course_ids)))
            }
            None => Ok(None),
        }
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            let student = parse_student_row(row)?;
            let course_ids = self.course_ids_for_student(student.id)?;
            students.push(student.with_course_ids(course_ids));
        }
        Ok(students)
    }

    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<Student> {
        self.conn()
            .execute(
                "INSERT INTO students (name, surname, school_number, student_class)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    draft.name(),
                    draft.surname(),
                    draft.school_number(),
                    draft.student_class(),
                ],
            )
            .map_err(|err| map_unique_violation(err, "students", "school_number"))?;

        let id = self.conn().last_insert_rowid();
        Ok(Student::new(id, draft))
    }

    fn update_student(&self, student: &Student) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute(
                "UPDATE students
                 SET
                    name = ?1,
                    surname = ?2,
                    school_number = ?3,
                    student_class = ?4,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?5;",
                params![
                    student.name.as_str(),
                    student.surname.as_str(),
                    student.school_number.as_str(),
                    student.student_class.as_deref(),
                    student.id,
                ],
            )
            .map_err(|err| map_unique_violation(err, "students", "school_number"))?;

        if changed == 0 {
            return Err(RepoError::StudentNotFound(student.id));
        }
        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::StudentNotFound(id));
        }
        Ok(())
    }

    fn student_id_by_school_number(&self, school_number: &str) -> RepoResult<Option<StudentId>> {
        let id = self
            .conn()
            .query_row(
                "SELECT id FROM students WHERE school_number = ?1;",
                [school_number],
                |row| row.get::<_, StudentId>(0),
            )
            .optional()?;
        Ok(id)
    }

    fn find_students_without_courses(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn().prepare(&format!(
            "{STUDENT_SELECT_SQL}
             WHERE NOT EXISTS (
                SELECT 1 FROM enrollments e WHERE e.student_id = students.id
             )
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    let id: StudentId = row.get("id")?;
    let draft = StudentDraft {
        name: row.get("name")?,
        surname: row.get("surname")?,
        school_number: row.get("school_number")?,
        student_class: row.get("student_class")?,
    };
    Ok(Student::new(id, &draft))
}
