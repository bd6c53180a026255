use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskboard",
    version,
    about = "Taskboard: REST backend for the task board web client"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Path to a TOML config file.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the task file.
    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    /// Address the API listens on, e.g. 127.0.0.1:8000.
    #[arg(long = "bind", global = true)]
    pub bind: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the task API (default).
    Serve,
    /// Create an empty task file if none exists.
    Init,
}

impl GlobalCli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 2 {
        "trace"
    } else if verbose == 1 {
        "debug"
    } else {
        "info"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = GlobalCli::parse_from(["taskboard"]);
        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = GlobalCli::parse_from([
            "taskboard",
            "init",
            "--data",
            "/tmp/board",
            "-vv",
        ]);
        assert_eq!(cli.command(), Command::Init);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/board")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn bind_flag_is_captured() {
        let cli = GlobalCli::parse_from(["taskboard", "--bind", "0.0.0.0:8080", "serve"]);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:8080"));
    }
}
