//! Grade records and the fixed set of subjects.

use super::student::StudentId;
use super::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-generated grade identifier, unique within one subject table.
pub type GradeId = i64;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

/// Grade category. Each subject is persisted in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Science,
    History,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Science, Subject::History];

    /// Parses a subject name. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "math" => Some(Self::Math),
            "science" => Some(Self::Science),
            "history" => Some(Self::History),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::History => "history",
        }
    }

    /// Backing table name.
    pub(crate) fn table(self) -> &'static str {
        match self {
            Self::Math => "math_grades",
            Self::Science => "science_grades",
            Self::History => "history_grades",
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether `value` is an acceptable grade.
pub fn is_valid_grade(value: f64) -> bool {
    value.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&value)
}

/// One grade a student received in one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// `None` until the record has been saved.
    pub id: Option<GradeId>,
    pub student_id: StudentId,
    pub subject: Subject,
    pub grade: f64,
}

impl GradeRecord {
    /// Creates an unsaved grade record.
    pub fn new(subject: Subject, student_id: StudentId, grade: f64) -> Self {
        Self {
            id: None,
            student_id,
            subject,
            grade,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if is_valid_grade(self.grade) {
            Ok(())
        } else {
            Err(ModelValidationError::GradeOutOfRange(self.grade))
        }
    }
}
