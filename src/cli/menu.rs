use std::{fmt, str::FromStr};

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddStudent,
    RecordAttendance,
    ViewAttendance,
    ListStudents,
    SortStudents,
    Exit,
}

impl MenuChoice {
    /// All entries, in the order they are numbered on screen.
    pub const ALL: [Self; 6] = [
        Self::AddStudent,
        Self::RecordAttendance,
        Self::ViewAttendance,
        Self::ListStudents,
        Self::SortStudents,
        Self::Exit,
    ];

    /// The number the user types to select this entry.
    pub const fn number(self) -> usize {
        match self {
            Self::AddStudent => 1,
            Self::RecordAttendance => 2,
            Self::ViewAttendance => 3,
            Self::ListStudents => 4,
            Self::SortStudents => 5,
            Self::Exit => 6,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::AddStudent => "Add Student",
            Self::RecordAttendance => "Record Attendance",
            Self::ViewAttendance => "View Attendance for Student",
            Self::ListStudents => "List All Students",
            Self::SortStudents => "Sort Students by Name",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Error returned when the typed text does not name a menu entry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid menu choice '{0}'")]
pub struct InvalidChoice(String);

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| trimmed == choice.number().to_string())
            .ok_or_else(|| InvalidChoice(trimmed.to_string()))
    }
}
