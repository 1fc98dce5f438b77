// Copyright (c) 2025 Robert August Vincent II <pillarsdotnet@gmail.com>
// Co-author: Cursor-AI.

//! # worktime — work presence CLI
//!
//! Meant to be run periodically (cron, launchd, a shell prompt hook). Each run
//! records "now" as the latest sighting of the day, then prints the presence
//! so far (elapsed time minus configured breaks) and the clock time at which
//! each daily target will be reached.
//!
//! State lives in `timeStash.json` next to the binary unless `--path` says
//! otherwise. Breaks, targets and the log switch are edited in that file.
//! When the date changes, the finished day is appended to `YYYY_MM.csv`.
//!
//! ## Usage
//!
//! | Command              | Description |
//! |----------------------|-------------|
//! | `worktime`           | Update the state with the current time and print the report. |
//! | `worktime --at T`    | Same, as of `T` (`YYYY-MM-DDTHH:MM`). |
//! | `worktime history`   | List the logged days of a month (`YYYY_MM`, `YYYY-MM`, `MM`; default: this month). |

mod config;
mod cycle;
mod daylog;
mod error;
mod format;
mod interval;
mod projection;
mod report;
mod state;

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use chrono::{Local, NaiveDateTime, TimeDelta};
use clap::{Parser, Subcommand};
use log::debug;
#[cfg(unix)]
use libc::{signal, SIG_IGN, SIGPIPE};

use crate::config::DayConfig;
use crate::daylog::{DayLog, Month};
use crate::error::{Error, Result};
use crate::format::{hours_minutes, parse_timestamp, truncate_to_minute, TIME_OF_DAY_FORMAT};
use crate::state::StateStore;

/// Environment variable holding the env_logger filter.
const LOG_ENV: &str = "WORKTIME_LOG";

#[derive(Debug, Parser)]
#[command(name = "worktime", version, about = "Track today's work presence net of breaks")]
struct Cli {
    /// Folder where the state file and the monthly logs are stored [default: the binary's folder]
    #[arg(short, long, env = "WORKTIME_PATH")]
    path: Option<PathBuf>,

    /// Run as of this time instead of now (YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = parse_at)]
    at: Option<NaiveDateTime>,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the logged days of a month and their total presence
    History {
        /// YYYY_MM, YYYY-MM or MM [default: the current month]
        month: Option<String>,
    },
}

fn parse_at(s: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_timestamp(s).ok_or_else(|| Error::InvalidTime(s.to_string()).to_string())
}

/// Sets up env_logger on stderr; `--verbose` lowers the default level from warn to debug.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, default))
        .format_timestamp(None)
        .init();
}

/// The directory holding the running executable.
fn default_storage_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(Error::InstallDir)?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::InstallDir(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

/// Local wall-clock time at the persisted minute resolution.
fn local_now() -> NaiveDateTime {
    truncate_to_minute(Local::now().naive_local())
}

/// Runs the update cycle and prints the report.
fn cmd_update(dir: &Path, now: NaiveDateTime, out: &mut impl Write) -> Result<()> {
    let store = StateStore::in_dir(dir);
    let day_log = DayLog::new(dir);
    let outcome = cycle::run(&store, &day_log, &DayConfig::default(), now)?;
    if let Some(path) = &outcome.logged {
        debug!("logged finished day to {}", path.display());
    }
    debug!("work span {} - {}", outcome.state.work.start, outcome.state.work.end);
    write_out(out, &outcome.report.to_string())
}

/// Prints the logged days of `month` (default: the month of `today`) and their total.
fn cmd_history(dir: &Path, month: Option<&str>, today: NaiveDateTime, out: &mut impl Write) -> Result<()> {
    let month = match month {
        Some(m) => Month::parse(m, today.date())?,
        None => Month::of(today.date()),
    };
    let day_log = DayLog::new(dir);
    let entries = match day_log.read_month(month)? {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            let name = month.file_name();
            let stem = name.trim_end_matches(".csv");
            return write_out(out, &format!("No entries for {}.\n", stem));
        }
    };
    let mut text = String::new();
    let mut total = TimeDelta::zero();
    for entry in &entries {
        total += entry.presence;
        text.push_str(&format!(
            "{}  {}-{}  {:>5} h\n",
            entry.date.format("%a %d.%m.%Y"),
            entry.start.format(TIME_OF_DAY_FORMAT),
            entry.end.format(TIME_OF_DAY_FORMAT),
            hours_minutes(entry.presence)
        ));
    }
    text.push_str(&format!(
        "Total  {} h over {} day(s)\n",
        hours_minutes(total),
        entries.len()
    ));
    write_out(out, &text)
}

/// Writes to stdout, treating a closed pipe as success.
fn write_out(out: &mut impl Write, text: &str) -> Result<()> {
    match out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::Output(e)),
        _ => Ok(()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let dir = match cli.path {
        Some(p) => p,
        None => default_storage_dir()?,
    };
    let now = cli.at.unwrap_or_else(local_now);
    debug!("storage {} at {}", dir.display(), now);
    let mut stdout = io::stdout().lock();
    match cli.command {
        None => cmd_update(&dir, now, &mut stdout),
        Some(Command::History { month }) => cmd_history(&dir, month.as_deref(), now, &mut stdout),
    }
}

fn main() {
    #[cfg(unix)]
    unsafe {
        signal(SIGPIPE, SIG_IGN);
    }
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("worktime: {}", e);
        process::exit(1);
    }
}
