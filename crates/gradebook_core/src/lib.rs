//! Core gradebook logic: students, per-subject grades and the composite
//! student detail view, persisted in SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, GradebookConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::grade::{is_valid_grade, GradeId, GradeRecord, Subject};
pub use model::gradebook::{GradebookEntry, StudentGrades};
pub use model::student::{Student, StudentId};
pub use model::ModelValidationError;
pub use repo::grade_repo::{GradeRepository, SqliteGradeRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoError, RepoResult};
pub use service::gradebook_service::{GradebookService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
