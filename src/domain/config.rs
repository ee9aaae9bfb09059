use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Settings for the interactive console.
///
/// None of these affect what the roster stores, only how dates are read and
/// how students are presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The `chrono` format string used to parse and print attendance dates.
    ///
    /// For example, `%Y-%m-%d` (2024-01-10) or `%d/%m/%Y` (10/01/2024).
    date_format: String,

    /// The answer assumed when the user presses enter at a "present?" prompt
    /// without typing anything.
    pub default_present: bool,

    /// Whether colored output is allowed.
    ///
    /// Even when `true`, color is only used if the terminal supports it.
    pub color: bool,

    /// How students are printed when listing or viewing them.
    pub output: OutputFormat,
}

/// Presentation of listed students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per student.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            default_present: false,
            color: true,
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Renders the configuration as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))
    }

    /// Returns the date format string.
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Sets the date format string.
    pub fn set_date_format(&mut self, format: impl Into<String>) {
        self.date_format = format.into();
    }

    /// Parses a calendar date typed by the user.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` does not match the configured format.
    pub fn parse_date(&self, input: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(input.trim(), &self.date_format)
    }

    /// Formats a date for display using the configured format.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

const fn default_color() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_date_format")]
        date_format: String,

        #[serde(default)]
        default_present: bool,

        #[serde(default = "default_color")]
        color: bool,

        #[serde(default)]
        output: OutputFormat,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                date_format,
                default_present,
                color,
                output,
            } => Self {
                date_format,
                default_present,
                color,
                output,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            date_format: config.date_format,
            default_present: config.default_present,
            color: config.color,
            output: config.output,
        }
    }
}
