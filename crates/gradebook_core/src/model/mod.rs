//! Gradebook domain model.
//!
//! # Responsibility
//! - Define student and grade records shared by gateways and services.
//! - Define the derived composite view returned for student detail reads.
//!
//! # Invariants
//! - Persisted records always carry a store-generated id.
//! - Grade values lie in `[0, 100]`.

pub mod grade;
pub mod gradebook;
pub mod student;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Model invariant violation detected before a write reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Grade value is outside `[0, 100]` or not a finite number.
    GradeOutOfRange(f64),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GradeOutOfRange(value) => {
                write!(f, "grade {value} is outside the accepted range 0..=100")
            }
        }
    }
}

impl Error for ModelValidationError {}
