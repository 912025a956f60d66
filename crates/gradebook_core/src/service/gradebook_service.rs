//! Gradebook use-case service.
//!
//! # Responsibility
//! - Student lifecycle: create, existence check, list, cascading delete.
//! - Grade lifecycle: validated create and subject-scoped delete.
//! - Assemble the composite student detail view.
//!
//! # Invariants
//! - Rejected input and missing rows are reported as `false`/`None`, never
//!   as errors, and cause no writes.
//! - Deleting a student removes its grade rows in the same transaction.
//! - Store failures propagate unchanged; nothing is retried.

use crate::model::grade::{is_valid_grade, GradeId, GradeRecord, Subject};
use crate::model::gradebook::{GradebookEntry, StudentGrades};
use crate::model::student::{Student, StudentId};
use crate::repo::grade_repo::{GradeRepository, SqliteGradeRepository};
use crate::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use crate::repo::RepoError;
use log::{debug, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from gradebook service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Gateway or store failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent gradebook state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Gradebook facade over one migrated connection.
pub struct GradebookService<'conn> {
    conn: &'conn Connection,
    students: SqliteStudentRepository<'conn>,
    math_grades: SqliteGradeRepository<'conn>,
    science_grades: SqliteGradeRepository<'conn>,
    history_grades: SqliteGradeRepository<'conn>,
}

impl<'conn> GradebookService<'conn> {
    /// Binds all four gateways to `conn`.
    ///
    /// Fails when the connection has not been migrated to the latest schema.
    pub fn try_new(conn: &'conn Connection) -> ServiceResult<Self> {
        Ok(Self {
            conn,
            students: SqliteStudentRepository::try_new(conn)?,
            math_grades: SqliteGradeRepository::try_new(conn, Subject::Math)?,
            science_grades: SqliteGradeRepository::try_new(conn, Subject::Science)?,
            history_grades: SqliteGradeRepository::try_new(conn, Subject::History)?,
        })
    }

    /// Student gateway, for callers that need raw lookups.
    pub fn students(&self) -> &SqliteStudentRepository<'conn> {
        &self.students
    }

    /// Grade gateway for `subject`.
    pub fn grades(&self, subject: Subject) -> &SqliteGradeRepository<'conn> {
        match subject {
            Subject::Math => &self.math_grades,
            Subject::Science => &self.science_grades,
            Subject::History => &self.history_grades,
        }
    }

    /// Persists a new student without grades.
    ///
    /// A duplicate email address fails at the store layer and is returned
    /// as an error.
    pub fn create_student(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
    ) -> ServiceResult<Student> {
        let student = Student::new(first_name, last_name, email_address);
        let saved = self.students.save(&student)?;
        info!(
            "event=student_create module=service status=ok student_id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Returns whether a student row with `id` exists.
    pub fn check_if_student_exists(&self, id: StudentId) -> ServiceResult<bool> {
        Ok(self.students.exists_by_id(id)?)
    }

    /// Deletes a student and every grade row it owns.
    ///
    /// Returns `false` without side effects when the student does not exist.
    /// All four deletes share one `IMMEDIATE` transaction; any failure rolls
    /// back every table.
    pub fn delete_student(&self, id: StudentId) -> ServiceResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !self.students.exists_by_id(id)? {
            debug!("event=student_delete module=service status=skipped student_id={id}");
            return Ok(false);
        }

        let mut removed_grades = 0;
        for subject in Subject::ALL {
            removed_grades += self.grades(subject).delete_by_student_id(id)?;
        }
        self.students.delete_by_id(id)?;
        tx.commit()?;

        info!(
            "event=student_delete module=service status=ok student_id={id} removed_grades={removed_grades}"
        );
        Ok(true)
    }

    /// Lists all students, without their grades.
    pub fn get_gradebook(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.students.find_all()?)
    }

    /// Records a grade given the subject as a plain name.
    ///
    /// Returns `false` without writing when the subject is not one of
    /// `math|science|history`, the value is outside `[0, 100]`, or the
    /// student does not exist.
    pub fn create_grade(
        &self,
        grade: f64,
        student_id: StudentId,
        subject: &str,
    ) -> ServiceResult<bool> {
        match Subject::parse(subject) {
            Some(subject) => self.create_grade_for(grade, student_id, subject),
            None => {
                warn!("event=grade_create module=service status=rejected reason=unknown_subject");
                Ok(false)
            }
        }
    }

    /// Typed variant of [`Self::create_grade`].
    pub fn create_grade_for(
        &self,
        grade: f64,
        student_id: StudentId,
        subject: Subject,
    ) -> ServiceResult<bool> {
        if !is_valid_grade(grade) {
            warn!(
                "event=grade_create module=service status=rejected reason=out_of_range subject={subject}"
            );
            return Ok(false);
        }
        if !self.students.exists_by_id(student_id)? {
            warn!(
                "event=grade_create module=service status=rejected reason=unknown_student subject={subject} student_id={student_id}"
            );
            return Ok(false);
        }

        let saved = self
            .grades(subject)
            .save(&GradeRecord::new(subject, student_id, grade))?;
        info!(
            "event=grade_create module=service status=ok subject={subject} student_id={student_id} grade_id={}",
            saved.id.unwrap_or_default()
        );
        Ok(true)
    }

    /// Deletes one grade row and returns the id of the student who owned it.
    ///
    /// Returns `None` without side effects when the subject name is unknown
    /// or no row with `id` exists under that subject.
    pub fn delete_grade(&self, id: GradeId, subject: &str) -> ServiceResult<Option<StudentId>> {
        let Some(subject) = Subject::parse(subject) else {
            warn!("event=grade_delete module=service status=rejected reason=unknown_subject");
            return Ok(None);
        };

        let repo = self.grades(subject);
        let Some(record) = repo.find_by_id(id)? else {
            debug!("event=grade_delete module=service status=skipped subject={subject} grade_id={id}");
            return Ok(None);
        };

        repo.delete_by_id(id)?;
        info!(
            "event=grade_delete module=service status=ok subject={subject} grade_id={id} student_id={}",
            record.student_id
        );
        Ok(Some(record.student_id))
    }

    /// Builds the detail view for one student, or `None` if absent.
    pub fn student_information(&self, student_id: StudentId) -> ServiceResult<Option<GradebookEntry>> {
        let Some(student) = self.students.find_by_id(student_id)? else {
            return Ok(None);
        };
        if student.id != Some(student_id) {
            return Err(ServiceError::InconsistentState(
                "student read-back returned a different id",
            ));
        }

        let student_grades = StudentGrades {
            math_grade_results: self.math_grades.find_by_student_id(student_id)?,
            science_grade_results: self.science_grades.find_by_student_id(student_id)?,
            history_grade_results: self.history_grades.find_by_student_id(student_id)?,
        };

        Ok(Some(GradebookEntry {
            student,
            student_grades,
        }))
    }
}
