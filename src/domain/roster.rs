//! In-memory roster of students
//!
//! The [`Roster`] knows nothing about the console or any file format. It owns
//! every [`Student`] and exposes them in two ways: by insertion order and by
//! ID.

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::instrument;

use crate::domain::Student;

/// The full collection of registered students.
///
/// Storage is split in two:
/// - Records: `Vec<Student>` in insertion order
/// - ID lookup: `HashMap<String, usize>` from ID to position in the records
///
/// Students are never removed, so a position stays valid once handed out.
#[derive(Debug, Default)]
pub struct Roster {
    /// Student records, in the order they were added.
    students: Vec<Student>,

    /// Position of each student in `students`, keyed by ID.
    index: HashMap<String, usize>,
}

/// Error returned when adding a student whose ID is already registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("a student with ID '{0}' already exists")]
pub struct DuplicateIdError(String);

impl DuplicateIdError {
    /// The ID that was already taken.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Roster {
    /// Creates an empty roster with room for `capacity` students.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            students: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Registers a new student.
    ///
    /// IDs are compared exactly (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateIdError`] if a student with the same ID already
    /// exists. The existing record is left untouched.
    #[instrument(level = "debug", skip_all)]
    pub fn add_student(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&mut Student, DuplicateIdError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            tracing::debug!(%id, "rejected duplicate student ID");
            return Err(DuplicateIdError(id));
        }

        let position = self.students.len();
        tracing::debug!(%id, size = position + 1, "student added");
        self.index.insert(id.clone(), position);
        self.students.push(Student::new(id, name));

        Ok(&mut self.students[position])
    }

    /// Returns an iterator over all students in insertion order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    /// Returns a mutable iterator over all students in insertion order.
    ///
    /// Only attendance can be changed through the yielded references.
    pub fn students_mut(&mut self) -> impl Iterator<Item = &mut Student> {
        self.students.iter_mut()
    }

    /// Looks up a student by ID.
    ///
    /// A missing ID is an ordinary outcome and yields `None`.
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.index
            .get(id)
            .and_then(|&position| self.students.get(position))
    }

    /// Looks up a student by ID for recording attendance.
    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        let position = *self.index.get(id)?;
        self.students.get_mut(position)
    }

    /// Whether a student with this ID is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The number of registered students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether no students are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Returns all students ordered by name, ignoring case.
    ///
    /// Names are compared by their upper-cased characters, so `_` (0x5F)
    /// sorts after every letter. The sort is stable: students whose names compare equal keep their
    /// insertion order. The roster itself is not reordered.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&Student> {
        let mut sorted: Vec<&Student> = self.students.iter().collect();
        sorted.sort_by_cached_key(|student| student.name().to_uppercase());
        sorted
    }

    /// Marks each of `present` as attending on `date`.
    ///
    /// Unknown IDs are skipped. Returns the number of attendance entries that
    /// were newly recorded.
    #[instrument(level = "debug", skip(self, present))]
    pub fn record_attendance<'a>(
        &mut self,
        date: NaiveDate,
        present: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let mut recorded = 0;
        for id in present {
            let Some(student) = self.student_mut(id) else {
                tracing::warn!(id, "cannot record attendance for unknown student");
                continue;
            };
            if student.add_attendance(date) {
                recorded += 1;
            }
        }
        recorded
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use test_case::test_case;

    use super::*;

    fn names(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.name().to_string()).collect()
    }

    fn ids<'a>(students: impl IntoIterator<Item = &'a Student>) -> Vec<&'a str> {
        students.into_iter().map(Student::id).collect()
    }

    #[test]
    fn empty_roster_yields_empty_sequences() {
        let roster = Roster::default();
        assert!(roster.is_empty());
        assert_eq!(roster.students().count(), 0);
        assert!(roster.sorted_by_name().is_empty());
    }

    #[test]
    fn duplicate_id_is_rejected_and_first_record_kept() {
        let mut roster = Roster::default();
        roster.add_student("S1", "Ann").unwrap();

        let error = roster.add_student("S1", "Ann2").unwrap_err();
        assert_eq!(error.id(), "S1");
        assert_eq!(error.to_string(), "a student with ID 'S1' already exists");

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.student("S1").unwrap().name(), "Ann");
    }

    #[test]
    fn ids_are_case_sensitive() {
        let mut roster = Roster::default();
        roster.add_student("s1", "Ann").unwrap();
        roster.add_student("S1", "Bob").unwrap();

        assert_eq!(roster.student("s1").unwrap().name(), "Ann");
        assert_eq!(roster.student("S1").unwrap().name(), "Bob");
    }

    #[test]
    fn lookup_returns_exact_student_or_none() {
        let mut roster = Roster::default();
        roster.add_student("S1", "Ann").unwrap();
        roster.add_student("S2", "Bob").unwrap();

        assert_eq!(roster.student("S2").unwrap().name(), "Bob");
        assert!(roster.student("UNKNOWN").is_none());
        assert!(!roster.contains("UNKNOWN"));
    }

    #[test]
    fn students_reflects_insertion_order_and_later_additions() {
        let mut roster = Roster::default();
        roster.add_student("S2", "Zed").unwrap();
        roster.add_student("S1", "Amy").unwrap();
        assert_eq!(ids(roster.students()), ["S2", "S1"]);

        roster.add_student("S3", "Max").unwrap();
        assert_eq!(ids(roster.students()), ["S2", "S1", "S3"]);
        assert_eq!(roster.students().count(), roster.len());
    }

    #[test]
    fn sorts_by_name_ignoring_case() {
        let mut roster = Roster::default();
        roster.add_student("S1", "Charlie").unwrap();
        roster.add_student("S2", "alice").unwrap();
        roster.add_student("S3", "Bob").unwrap();

        assert_eq!(names(&roster.sorted_by_name()), ["alice", "Bob", "Charlie"]);
        // insertion order is untouched
        assert_eq!(ids(roster.students()), ["S1", "S2", "S3"]);
    }

    #[test_case(&["bob", "Bob"], &["S1", "S2"]; "lower first")]
    #[test_case(&["Bob", "bob"], &["S1", "S2"]; "upper first")]
    #[test_case(&["BOB", "amy", "bob", "Bob"], &["S2", "S1", "S3", "S4"]; "ties keep insertion order")]
    #[test_case(&["_Zed", "amy"], &["S2", "S1"]; "underscore after letters")]
    #[test_case(&["[x]", "Zoe", "zack"], &["S3", "S2", "S1"]; "bracket after letters")]
    fn sorts_case_insensitively_and_stably(input: &[&str], expected: &[&str]) {
        let mut roster = Roster::default();
        for (i, name) in input.iter().enumerate() {
            roster.add_student(format!("S{}", i + 1), *name).unwrap();
        }

        assert_eq!(ids(roster.sorted_by_name()), expected);
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut roster = Roster::default();
        for (id, name) in [("S1", "delta"), ("S2", "Alpha"), ("S3", "charlie"), ("S4", "alpha")] {
            roster.add_student(id, name).unwrap();
        }
        let first = ids(roster.sorted_by_name());

        let mut resorted = Roster::default();
        for student in roster.sorted_by_name() {
            resorted.add_student(student.id(), student.name()).unwrap();
        }

        assert_eq!(ids(resorted.sorted_by_name()), first);
        assert_eq!(first, ["S2", "S4", "S3", "S1"]);
    }

    #[test]
    fn attendance_recorded_through_roster_is_deduplicated() {
        let mut roster = Roster::default();
        roster.add_student("S1", "Ann").unwrap();
        roster.add_student("S2", "Bob").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        assert_eq!(roster.record_attendance(day, ["S1", "UNKNOWN"]), 1);
        assert_eq!(roster.record_attendance(day, ["S1", "S2"]), 1);

        assert_eq!(roster.student("S1").unwrap().attendance_dates(), &[day]);
        assert_eq!(roster.student("S2").unwrap().attendance_dates(), &[day]);
    }

    #[test]
    fn attendance_via_mutable_iteration() {
        let mut roster = Roster::default();
        roster.add_student("S1", "Ann").unwrap();
        roster.add_student("S2", "Bob").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        for student in roster.students_mut().filter(|s| s.name() == "Bob") {
            student.add_attendance(day);
        }

        assert!(roster.student("S1").unwrap().attendance_dates().is_empty());
        assert!(roster.student("S2").unwrap().attended(day));
    }
}
