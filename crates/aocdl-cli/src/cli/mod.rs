//! CLI for aocdl.

mod commands;

use anyhow::Result;
use aocdl_core::config::{self, AocdlConfig, CredentialSourceKind};
use aocdl_core::day::{self, Day};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_completions, run_download};

/// Top-level CLI for aocdl.
#[derive(Debug, Parser)]
#[command(name = "aocdl")]
#[command(about = "Download Advent of Code puzzle inputs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Credential source as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    File,
    Firefox,
}

impl From<SourceArg> for CredentialSourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::File => CredentialSourceKind::File,
            SourceArg::Firefox => CredentialSourceKind::Firefox,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the puzzle input for one day.
    #[command(visible_alias = "dl")]
    Download {
        /// Day of the puzzle (1-25). Defaults to today's day of the month.
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: Option<u8>,

        /// Directory the input is written to (default from config: `input`).
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,

        /// Puzzle year (default from config).
        #[arg(short, long)]
        year: Option<u16>,

        /// Where to read the session cookie from (default from config).
        #[arg(long, value_enum)]
        source: Option<SourceArg>,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.run(day::current_day_of_month(), config::load_or_init)
            .await
    }

    /// Dispatches a parsed command. `today` is the day-of-month used when
    /// `--day` is omitted; `load_config` is only called once the day is valid.
    pub async fn run<F>(self, today: u32, load_config: F) -> Result<()>
    where
        F: FnOnce() -> Result<AocdlConfig>,
    {
        match self.command {
            CliCommand::Download {
                day,
                dir,
                year,
                source,
            } => {
                let day = Day::or_default(day, today)?;
                let cfg = load_config()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_download(&cfg, day, dir, year, source.map(Into::into)).await?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}
