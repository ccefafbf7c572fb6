//! Request DTOs and their validation.

use crate::model::course::CourseDraft;
use crate::model::student::StudentDraft;
use crate::model::validation::{
    ValidationErrors, Validator, COURSE_NAME_MAX_CHARS, NAME_MAX_CHARS, SCHOOL_NUMBER_MAX_CHARS,
    SCHOOL_NUMBER_MIN_CHARS, STUDENT_CLASS_MAX_CHARS, SURNAME_MAX_CHARS,
};
use serde::{Deserialize, Serialize};

/// Raw student input for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRequest {
    pub name: String,
    pub surname: String,
    pub school_number: String,
    #[serde(default)]
    pub student_class: Option<String>,
}

impl StudentRequest {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        school_number: impl Into<String>,
        student_class: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            school_number: school_number.into(),
            student_class,
        }
    }

    /// Trims every field and checks it against the student constraints.
    ///
    /// Returns every violation found, not only the first.
    pub fn validate(&self) -> Result<StudentDraft, ValidationErrors> {
        let name = self.name.trim();
        let surname = self.surname.trim();
        let school_number = self.school_number.trim();
        let student_class = self.student_class.as_deref().map(str::trim);

        let mut validator = Validator::new();
        validator.required("name", name, 1, NAME_MAX_CHARS);
        validator.required("surname", surname, 1, SURNAME_MAX_CHARS);
        validator.required(
            "school_number",
            school_number,
            SCHOOL_NUMBER_MIN_CHARS,
            SCHOOL_NUMBER_MAX_CHARS,
        );
        validator.school_number(school_number);
        validator.optional("student_class", student_class, 1, STUDENT_CLASS_MAX_CHARS);
        validator.finish()?;

        Ok(StudentDraft {
            name: name.to_string(),
            surname: surname.to_string(),
            school_number: school_number.to_string(),
            student_class: student_class.map(str::to_string),
        })
    }
}

/// Raw course input for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    pub name: String,
}

impl CourseRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<CourseDraft, ValidationErrors> {
        let name = self.name.trim();

        let mut validator = Validator::new();
        validator.required("name", name, 1, COURSE_NAME_MAX_CHARS);
        validator.finish()?;

        Ok(CourseDraft {
            name: name.to_string(),
        })
    }
}
