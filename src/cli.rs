use std::{io, path::PathBuf};

mod config;
mod menu;
mod session;
mod terminal;

use attendance::{Config, Roster};
use clap::ArgAction;
use session::Session;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML settings file (defaults are used if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))?,
            None => Config::default(),
        };
        tracing::debug!(?config, "loaded settings");

        self.command
            .unwrap_or(Command::Session)
            .run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the session
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the interactive attendance menu (default)
    Session,

    /// Show or create settings files
    Config(config::Command),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Session => run_session(config)?,
            Self::Config(command) => command.run(&config)?,
        }
        Ok(())
    }
}

#[instrument(skip_all)]
fn run_session(config: Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let color = config.color && terminal::supports_color();

    let mut session = Session::new(Roster::default(), config, stdin.lock(), stdout.lock())
        .with_color(color);
    session.run()?;

    tracing::info!(students = session.roster().len(), "session ended");
    Ok(())
}
