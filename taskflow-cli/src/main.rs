//! Taskflow — interactive in-memory task tracker.
//!
//! # Usage
//!
//! ```text
//! taskflow [--shared-ids] [--verbose] [--no-color]
//! ```
//!
//! The menu reads from stdin and writes to stdout; logs go to stderr.
//! Nothing is persisted: all projects, users and tasks vanish on exit.

mod shell;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use taskflow_core::{IdPolicy, Registry};

use shell::Shell;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "taskflow",
    version,
    about = "Track projects, tasks and assignees from an interactive menu",
    long_about = None,
)]
struct Cli {
    /// Draw project, user and task ids from one shared counter instead of
    /// numbering each kind from 1.
    #[arg(long)]
    shared_ids: bool,

    /// Log registry activity at debug level (overridden by RUST_LOG).
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Disable coloured output.
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn id_policy(&self) -> IdPolicy {
        if self.shared_ids {
            IdPolicy::Shared
        } else {
            IdPolicy::PerKind
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let registry = Registry::new(cli.id_policy());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(registry, stdin.lock(), stdout.lock());
    shell.run().context("interactive session failed")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
