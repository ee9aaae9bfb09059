//! In-memory Student Attendance Register
//!
//! A roster of students, each with the set of days they were present.

pub mod domain;
pub use domain::{Config, DuplicateIdError, OutputFormat, Roster, Student};
