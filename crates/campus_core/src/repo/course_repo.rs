//! Course repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_courses` and `find_courses_without_students` are ordered by id.
//! - Writes never touch enrollment rows; see `enrollment_repo`.

use crate::model::course::{Course, CourseDraft, CourseId};
use crate::repo::sqlite::{map_unique_violation, SqliteCampusRepository};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, OptionalExtension, Row};

/// Repository interface for course records.
pub trait CourseRepository {
    /// Loads one course with its student ids.
    fn find_course(&self, id: CourseId) -> RepoResult<Option<Course>>;
    /// Lists every course in id order.
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
    /// Persists a new course and returns it with its assigned id.
    fn insert_course(&self, draft: &CourseDraft) -> RepoResult<Course>;
    /// Overwrites the name of an existing course.
    fn update_course(&self, course: &Course) -> RepoResult<()>;
    /// Deletes a course and its enrollments.
    fn delete_course(&self, id: CourseId) -> RepoResult<()>;
    /// Returns the id of the course named `name`, if any.
    fn course_id_by_name(&self, name: &str) -> RepoResult<Option<CourseId>>;
    /// Lists courses that hold no student, in id order.
    fn find_courses_without_students(&self) -> RepoResult<Vec<Course>>;

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        Ok(self.course_id_by_name(name)?.is_some())
    }
}

impl<T: CourseRepository + ?Sized> CourseRepository for &T {
    fn find_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        (**self).find_course(id)
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        (**self).list_courses()
    }

    fn insert_course(&self, draft: &CourseDraft) -> RepoResult<Course> {
        (**self).insert_course(draft)
    }

    fn update_course(&self, course: &Course) -> RepoResult<()> {
        (**self).update_course(course)
    }

    fn delete_course(&self, id: CourseId) -> RepoResult<()> {
        (**self).delete_course(id)
    }

    fn course_id_by_name(&self, name: &str) -> RepoResult<Option<CourseId>> {
        (**self).course_id_by_name(name)
    }

    fn find_courses_without_students(&self) -> RepoResult<Vec<Course>> {
        (**self).find_courses_without_students()
    }
}

impl CourseRepository for SqliteCampusRepository<'_> {
    fn find_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        let course = self
            .conn()
            .query_row(
                "SELECT id, name FROM courses WHERE id = ?1;",
                [id],
                parse_course_row,
            )
            .optional()?;

        match course {
            Some(course) => {
                let student_ids = self.student_ids_for_course(course.id)?;
                Ok(Some(course.with_student_ids(student_ids)))
            }
            None => Ok(None),
        }
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name FROM courses ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next()? {
            let course = parse_course_row(row)?;
            let student_ids = self.student_ids_for_course(course.id)?;
            courses.push(course.with_student_ids(student_ids));
        }
        Ok(courses)
    }

    fn insert_course(&self, draft: &CourseDraft) -> RepoResult<Course> {
        self.conn()
            .execute("INSERT INTO courses (name) VALUES (?1);", [draft.name()])
            .map_err(|err| map_unique_violation(err, "courses", "name"))?;

        let id = self.conn().last_insert_rowid();
        Ok(Course::new(id, draft))
    }

    fn update_course(&self, course: &Course) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute(
                "UPDATE courses
                 SET
                    name = ?1,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?2;",
                params![course.name.as_str(), course.id],
            )
            .map_err(|err| map_unique_violation(err, "courses", "name"))?;

        if changed == 0 {
            return Err(RepoError::CourseNotFound(course.id));
        }
        Ok(())
    }

    fn delete_course(&self, id: CourseId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM courses WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::CourseNotFound(id));
        }
        Ok(())
    }

    fn course_id_by_name(&self, name: &str) -> RepoResult<Option<CourseId>> {
        let id = self
            .conn()
            .query_row("SELECT id FROM courses WHERE name = ?1;", [name], |row| {
                row.get::<_, CourseId>(0)
            })
            .optional()?;
        Ok(id)
    }

    fn find_courses_without_students(&self) -> RepoResult<Vec<Course>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, name
             FROM courses
             WHERE NOT EXISTS (
                SELECT 1 FROM enrollments e WHERE e.course_id = courses.id
             )
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next()? {
            courses.push(parse_course_row(row)?);
        }
        Ok(courses)
    }
}

fn parse_course_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    let id: CourseId = row.get("id")?;
    let draft = CourseDraft {
        name: row.get("name")?,
    };
    Ok(Course::new(id, &draft))
}
