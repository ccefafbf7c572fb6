//! SQLite-backed campus repository.
//!
//! # Responsibility
//! - Own the borrowed connection shared by the student, course and
//!   enrollment repository implementations.
//! - Load membership sets from the `enrollments` join table.
//!
//! # Invariants
//! - Construction fails unless the connection is migrated to the latest
//!   schema version.

use crate::db::migrations::latest_version;
use crate::model::course::CourseId;
use crate::model::student::StudentId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, ErrorCode};
use std::collections::BTreeSet;

/// SQLite implementation of every campus repository trait.
///
/// Holds only a borrowed connection, so copies are cheap and several
/// services may share one connection.
#[derive(Clone, Copy)]
pub struct SqliteCampusRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCampusRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &'conn Connection {
        self.conn
    }

    pub(crate) fn course_ids_for_student(
        &self,
        student_id: StudentId,
    ) -> RepoResult<BTreeSet<CourseId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT course_id FROM enrollments WHERE student_id = ?1;")?;
        let ids = stmt
            .query_map([student_id], |row| row.get::<_, CourseId>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    pub(crate) fn student_ids_for_course(
        &self,
        course_id: CourseId,
    ) -> RepoResult<BTreeSet<StudentId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT student_id FROM enrollments WHERE course_id = ?1;")?;
        let ids = stmt
            .query_map([course_id], |row| row.get::<_, StudentId>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }
}

/// Converts a SQLite UNIQUE failure into `RepoError::UniqueViolation`.
///
/// Only the table's single unique column is expected to trip here; other
/// errors pass through as `RepoError::Db`.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    table: &'static str,
    column: &'static str,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::UniqueViolation { table, column }
        }
        _ => err.into(),
    }
}
