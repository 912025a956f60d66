//! Composite student detail view.
//!
//! # Responsibility
//! - Group one student's grade records by subject.
//! - Derive per-subject sums and averages on read.
//!
//! # Invariants
//! - Never persisted; rebuilt from gateway reads on every request.
//! - Averages are rounded half-up to two decimals on their shortest decimal
//!   form, so `1.005` becomes `1.01` even though its binary value is below it.
//! - Averages are `0.0` with no grades.

use super::grade::{GradeRecord, Subject};
use super::student::{Student, StudentId};
use serde::{Deserialize, Serialize};

/// All grade records of one student, split by subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentGrades {
    pub math_grade_results: Vec<GradeRecord>,
    pub science_grade_results: Vec<GradeRecord>,
    pub history_grade_results: Vec<GradeRecord>,
}

impl StudentGrades {
    pub fn results(&self, subject: Subject) -> &[GradeRecord] {
        match subject {
            Subject::Math => &self.math_grade_results,
            Subject::Science => &self.science_grade_results,
            Subject::History => &self.history_grade_results,
        }
    }

    pub fn sum(&self, subject: Subject) -> f64 {
        self.results(subject).iter().map(|record| record.grade).sum()
    }

    /// Mean grade for `subject`, rounded half-up to two decimals.
    pub fn average(&self, subject: Subject) -> f64 {
        let results = self.results(subject);
        if results.is_empty() {
            return 0.0;
        }
        round_to_cents(self.sum(subject) / results.len() as f64)
    }

    pub fn total_count(&self) -> usize {
        Subject::ALL
            .iter()
            .map(|subject| self.results(*subject).len())
            .sum()
    }
}

/// Read-only detail view: one student plus every grade they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookEntry {
    pub student: Student,
    pub student_grades: StudentGrades,
}

impl GradebookEntry {
    pub fn id(&self) -> Option<StudentId> {
        self.student.id
    }

    pub fn full_name(&self) -> String {
        self.student.full_name()
    }

    pub fn math_average(&self) -> f64 {
        self.student_grades.average(Subject::Math)
    }

    pub fn science_average(&self) -> f64 {
        self.student_grades.average(Subject::Science)
    }

    pub fn history_average(&self) -> f64 {
        self.student_grades.average(Subject::History)
    }
}

fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Shortest round-trip digits, e.g. `1.005` rather than `1.00499999...`.
    let digits = value.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    if fraction.len() <= 2 {
        return value;
    }
    let Ok(whole) = whole.parse::<f64>() else {
        return (value * 100.0).round() / 100.0;
    };

    let fraction = fraction.as_bytes();
    let mut cents = whole * 100.0 + f64::from((fraction[0] - b'0') * 10 + (fraction[1] - b'0'));
    if fraction[2] >= b'5' {
        cents += 1.0;
    }
    (cents / 100.0).copysign(value)
}
