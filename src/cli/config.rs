use std::path::{Path, PathBuf};

use attendance::Config;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
/// Show or create settings files
///
/// Settings control how the interactive session reads and prints dates and
/// students. They never contain roster data.
///
/// Available keys:
///   `date_format`      chrono format for attendance dates (default: %Y-%m-%d)
///   `default_present`  answer assumed for an empty "present?" reply (default:
/// false)
///   color            allow colored output (default: true)
///   output           `text` or `json` (default: text)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show the effective settings as TOML
    Show,

    /// Write the default settings to a new file
    Init {
        /// Where to write the settings file
        path: PathBuf,

        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                print!("{}", config.to_toml().map_err(|e| anyhow::anyhow!("{e}"))?);
                Ok(())
            }
            ConfigCommand::Init { path, force } => {
                init_config(&path, force)?;
                println!("Wrote default settings to {}", path.display());
                Ok(())
            }
        }
    }
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save(path)
        .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use attendance::Config;
    use tempfile::tempdir;

    use super::init_config;

    #[test]
    fn init_writes_loadable_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("attend.toml");

        init_config(&path, false).unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("attend.toml");
        std::fs::write(&path, "_version = \"1\"\ncolor = false\n").unwrap();

        let error = init_config(&path, false).unwrap_err();
        assert!(error.to_string().contains("already exists"));
        assert!(!Config::load(&path).unwrap().color);

        init_config(&path, true).unwrap();
        assert!(Config::load(&path).unwrap().color);
    }
}
