//! Command-line arguments for the campus handler binary.

use campus_core::{CourseId, CourseRequest, StudentId, StudentRequest};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Student/course enrollment backend driven from the command line.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file; created and migrated on first use
    #[arg(long, env = "CAMPUS_DB", global = true, default_value = "campus.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace|debug|info|warn|error (default depends on build mode)
    #[arg(long, env = "CAMPUS_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, env = "CAMPUS_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage students
    Student {
        #[command(subcommand)]
        command: StudentCommands,
    },

    /// Manage courses and enrollments
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },

    /// Show core version and schema version
    Info,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// List all students
    List,
    /// Show one student
    Get { id: StudentId },
    /// Create a student
    Create(StudentFields),
    /// Overwrite a student's fields
    Update {
        id: StudentId,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student and its enrollments
    Delete { id: StudentId },
    /// List students enrolled in no course
    WithoutCourses,
    /// List students with their comma-joined course names
    WithCourses,
    /// List the courses of one student
    Courses { id: StudentId },
}

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// List all courses
    List,
    /// Show one course
    Get { id: CourseId },
    /// Create a course
    Create(CourseFields),
    /// Rename a course
    Update {
        id: CourseId,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Delete a course and its enrollments
    Delete { id: CourseId },
    /// List courses with no enrolled student
    WithoutStudents,
    /// List the students of one course
    Students { id: CourseId },
    /// Enroll a student into a course
    Enroll {
        #[arg(long)]
        student_id: StudentId,
        #[arg(long)]
        course_id: CourseId,
    },
}

#[derive(Args, Debug, Clone)]
pub struct StudentFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub school_number: String,
    /// Optional class label
    #[arg(long = "class")]
    pub student_class: Option<String>,
}

impl From<&StudentFields> for StudentRequest {
    fn from(fields: &StudentFields) -> Self {
        StudentRequest::new(
            fields.name.as_str(),
            fields.surname.as_str(),
            fields.school_number.as_str(),
            fields.student_class.clone(),
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct CourseFields {
    #[arg(long)]
    pub name: String,
}

impl From<&CourseFields> for CourseRequest {
    fn from(fields: &CourseFields) -> Self {
        CourseRequest::new(fields.name.as_str())
    }
}
