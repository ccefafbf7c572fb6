//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for students, courses
//!   and enrollments.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Read APIs return fully loaded records, membership sets included.
//! - Repository APIs return semantic errors (`StudentNotFound`,
//!   `UniqueViolation`) in addition to DB transport errors.
//! - Deleting a record clears its memberships on the other side.

use crate::db::DbError;
use crate::model::course::CourseId;
use crate::model::student::StudentId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod course_repo;
pub mod enrollment_repo;
pub mod in_memory;
pub mod sqlite;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for campus persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target student row does not exist.
    StudentNotFound(StudentId),
    /// Target course row does not exist.
    CourseNotFound(CourseId),
    /// A unique column already holds the written value.
    UniqueViolation {
        table: &'static str,
        column: &'static str,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::UniqueViolation { table, column } => {
                write!(f, "unique constraint violated on {table}.{column}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "campus repository requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
