//! The interactive attendance menu.
//!
//! A [`Session`] reads commands and answers line by line from any
//! [`BufRead`] and writes prompts and reports to any [`Write`], so the same
//! loop drives a terminal or a scripted test.

use std::{
    io::{self, BufRead, Write},
    ops::ControlFlow,
};

use attendance::{Config, OutputFormat, Roster, Student};
use non_empty_string::NonEmptyString;
use tracing::instrument;

use super::{menu::MenuChoice, terminal::Palette};

const TITLE: &str = "-- Student Attendance Management System --";

/// Whether the menu loop should keep going after an action.
type Flow = ControlFlow<()>;

pub struct Session<R, W> {
    roster: Roster,
    config: Config,
    input: R,
    output: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(roster: Roster, config: Config, input: R, output: W) -> Self {
        Self {
            roster,
            config,
            input,
            output,
            palette: Palette::default(),
        }
    }

    /// Enable or disable colored output.
    #[must_use]
    pub const fn with_color(mut self, enabled: bool) -> Self {
        self.palette = Palette::new(enabled);
        self
    }

    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Runs the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(choice) => self.dispatch(choice)?,
                Err(e) => {
                    tracing::debug!("{e}");
                    writeln!(self.output, "{}", self.palette.warning("Invalid choice."))?;
                    Flow::Continue(())
                }
            };

            if flow.is_break() {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> anyhow::Result<Flow> {
        match choice {
            MenuChoice::AddStudent => self.add_student(),
            MenuChoice::RecordAttendance => self.record_attendance(),
            MenuChoice::ViewAttendance => self.view_attendance(),
            MenuChoice::ListStudents => self.list_students().map(|()| Flow::Continue(())),
            MenuChoice::SortStudents => self.sort_students().map(|()| Flow::Continue(())),
            MenuChoice::Exit => Ok(Flow::Break(())),
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.palette.heading(TITLE))?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{choice}")?;
        }
        Ok(())
    }

    /// Writes `message` and reads one trimmed line.
    ///
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    fn add_student(&mut self) -> anyhow::Result<Flow> {
        let Some(id) = self.prompt("Enter Student ID: ")? else {
            return Ok(Flow::Break(()));
        };
        let Some(name) = self.prompt("Enter Student Name: ")? else {
            return Ok(Flow::Break(()));
        };

        let (Ok(id), Ok(name)) = (NonEmptyString::new(id), NonEmptyString::new(name)) else {
            let message = "Error: student ID and name must not be blank.";
            writeln!(self.output, "{}", self.palette.warning(message))?;
            return Ok(Flow::Continue(()));
        };

        match self.roster.add_student(id.as_str(), name.as_str()) {
            Ok(_) => {
                let message = "Student added successfully.";
                writeln!(self.output, "{}", self.palette.success(message))?;
            }
            Err(e) => {
                writeln!(self.output, "{}", self.palette.warning(&format!("Error: {e}")))?;
            }
        }
        Ok(Flow::Continue(()))
    }

    #[instrument(level = "debug", skip(self))]
    fn record_attendance(&mut self) -> anyhow::Result<Flow> {
        let message = format!("Enter date ({}): ", self.config.date_format());
        let Some(input) = self.prompt(&message)? else {
            return Ok(Flow::Break(()));
        };
        let date = match self.config.parse_date(&input) {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!(%input, "rejected date: {e}");
                writeln!(self.output, "{}", self.palette.warning("Invalid date format."))?;
                return Ok(Flow::Continue(()));
            }
        };

        let students: Vec<(String, String)> = self
            .roster
            .students()
            .map(|s| (s.id().to_string(), s.name().to_string()))
            .collect();

        let mut present = Vec::new();
        let mut flow = Flow::Continue(());
        for (id, name) in students {
            let Some(answer) = self.prompt(&format!("Is {name} present? (y/n): "))? else {
                flow = Flow::Break(());
                break;
            };
            if self.is_present(&answer) {
                present.push(id);
            }
        }

        let recorded = self
            .roster
            .record_attendance(date, present.iter().map(String::as_str));
        tracing::info!(%date, recorded, "attendance recorded");

        let message = format!("Attendance recorded for {}.", self.config.format_date(date));
        writeln!(self.output, "{}", self.palette.success(&message))?;
        Ok(flow)
    }

    fn is_present(&self, answer: &str) -> bool {
        if answer.is_empty() {
            return self.config.default_present;
        }
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }

    #[instrument(level = "debug", skip(self))]
    fn view_attendance(&mut self) -> anyhow::Result<Flow> {
        let Some(id) = self.prompt("Enter Student ID: ")? else {
            return Ok(Flow::Break(()));
        };

        let Some(student) = self.roster.student(&id) else {
            writeln!(self.output, "{}", self.palette.warning("Student not found."))?;
            return Ok(Flow::Continue(()));
        };

        if self.config.output == OutputFormat::Json {
            writeln!(self.output, "{}", serde_json::to_string_pretty(student)?)?;
            return Ok(Flow::Continue(()));
        }

        writeln!(self.output)?;
        let heading = format!(
            "Attendance records for {} ({}):",
            student.name(),
            student.id()
        );
        writeln!(self.output, "{}", self.palette.heading(&heading))?;
        if student.attendance_dates().is_empty() {
            writeln!(self.output, "{}", self.palette.dim("No attendance records."))?;
        } else {
            for &date in student.attendance_dates() {
                writeln!(self.output, "{}", self.config.format_date(date))?;
            }
        }
        Ok(Flow::Continue(()))
    }

    fn list_students(&mut self) -> anyhow::Result<()> {
        let students: Vec<&Student> = self.roster.students().collect();
        write_students(
            &mut self.output,
            self.palette,
            self.config.output,
            "All Students:",
            &students,
        )
    }

    fn sort_students(&mut self) -> anyhow::Result<()> {
        let students = self.roster.sorted_by_name();
        write_students(
            &mut self.output,
            self.palette,
            self.config.output,
            "Students sorted by name:",
            &students,
        )
    }
}

fn write_students(
    output: &mut impl Write,
    palette: Palette,
    format: OutputFormat,
    heading: &str,
    students: &[&Student],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(output)?;
            writeln!(output, "{}", palette.heading(heading))?;
            for student in students {
                writeln!(output, "{} - {}", student.id(), student.name())?;
            }
        }
        OutputFormat::Json => {
            writeln!(output, "{}", serde_json::to_string_pretty(students)?)?;
        }
    }
    Ok(())
}
