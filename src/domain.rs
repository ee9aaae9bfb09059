//! Domain models for the attendance register.
//!
//! This module contains the core domain types: student records, the roster
//! that owns them, and the console configuration.

/// Student records and their attendance history.
pub mod student;
pub use student::Student;

/// The roster of registered students.
pub mod roster;
pub use roster::{DuplicateIdError, Roster};

mod config;
pub use config::{Config, OutputFormat};
