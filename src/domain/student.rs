use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

/// A registered student and the days on which they were marked present.
///
/// The identity fields are fixed at construction. The only way to change a
/// student afterwards is to record attendance, so a `&mut Student` handed out
/// by the [`Roster`](crate::Roster) cannot alter who the student is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    id: String,
    name: String,
    /// Attendance dates in the order they were first recorded.
    attendance_dates: Vec<NaiveDate>,
    /// Mirror of `attendance_dates` for constant-time duplicate checks.
    #[serde(skip)]
    seen: HashSet<NaiveDate>,
}

impl Student {
    /// Construct a new [`Student`] with no attendance recorded.
    ///
    /// Neither field is validated. Uniqueness of the ID is enforced by the
    /// roster, not by the record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attendance_dates: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// The student's unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The student's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark the student present on the given day.
    ///
    /// Recording the same day more than once has no further effect.
    ///
    /// Returns `true` if the date was newly recorded, or `false` if it was
    /// already present.
    pub fn add_attendance(&mut self, date: NaiveDate) -> bool {
        if !self.seen.insert(date) {
            return false;
        }
        self.attendance_dates.push(date);
        true
    }

    /// The days on which the student was present, in recording order.
    #[must_use]
    pub fn attendance_dates(&self) -> &[NaiveDate] {
        &self.attendance_dates
    }

    /// Whether the student was marked present on `date`.
    #[must_use]
    pub fn attended(&self, date: NaiveDate) -> bool {
        self.seen.contains(&date)
    }
}
