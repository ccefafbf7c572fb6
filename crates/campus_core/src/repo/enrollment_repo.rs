//! Enrollment persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist a student/course link, visible from both sides, in one write.
//!
//! # Invariants
//! - Only the `(student.id, course.id)` pair is written. Other ids in the
//!   records' membership sets may be stale and are ignored.
//! - Re-saving an already stored link is a no-op.

use crate::model::course::Course;
use crate::model::student::Student;
use crate::repo::course_repo::CourseRepository;
use crate::repo::sqlite::SqliteCampusRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Transaction, TransactionBehavior};

/// Repository interface for relationship writes.
pub trait EnrollmentRepository: StudentRepository + CourseRepository {
    /// Persists the link between `student` and `course`.
    fn save_enrollment(&self, student: &Student, course: &Course) -> RepoResult<()>;
}

impl<T: EnrollmentRepository + ?Sized> EnrollmentRepository for &T {
    fn save_enrollment(&self, student: &Student, course: &Course) -> RepoResult<()> {
        (**self).save_enrollment(student, course)
    }
}

impl EnrollmentRepository for SqliteCampusRepository<'_> {
    fn save_enrollment(&self, student: &Student, course: &Course) -> RepoResult<()> {
        // Write lock is held from the existence checks until commit.
        let tx = Transaction::new_unchecked(self.conn(), TransactionBehavior::Immediate)?;

        if !row_exists(&tx, "students", student.id)? {
            return Err(RepoError::StudentNotFound(student.id));
        }
        if !row_exists(&tx, "courses", course.id)? {
            return Err(RepoError::CourseNotFound(course.id));
        }

        tx.execute(
            "INSERT OR IGNORE INTO enrollments (student_id, course_id) VALUES (?1, ?2);",
            params![student.id, course.id],
        )?;

        tx.commit()?;
        Ok(())
    }
}

fn row_exists(tx: &Transaction<'_>, table: &'static str, id: i64) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
