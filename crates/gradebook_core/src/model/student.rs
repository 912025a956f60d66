//! Student record.

use serde::{Deserialize, Serialize};

/// Store-generated student identifier. Generated ids start at 1.
pub type StudentId = i64;

/// One enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// `None` until the record has been saved.
    pub id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all students; used for lookup.
    pub email_address: String,
}

impl Student {
    /// Creates an unsaved student record.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
        }
    }

    /// Returns `"first last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::Student;

    #[test]
    fn new_student_is_unsaved() {
        let student = Student::new("eric", "roby", "eric@example.com");
        assert_eq!(student.id, None);
        assert_eq!(student.full_name(), "eric roby");
    }
}
