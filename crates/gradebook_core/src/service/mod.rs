//! Gradebook use-case services.
//!
//! # Responsibility
//! - Orchestrate the student and grade gateways into gradebook operations.
//! - Keep CLI and other callers decoupled from storage details.

pub mod gradebook_service;
