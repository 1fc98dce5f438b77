//! One update cycle: load or initialize the state, roll the day over if the
//! date changed, advance the work end to `now`, persist, and report.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::config::DayConfig;
use crate::daylog::DayLog;
use crate::error::Result;
use crate::interval::Span;
use crate::report::Report;
use crate::state::{State, StateStore};

/// What a cycle did.
#[derive(Debug)]
pub struct Outcome {
    pub state: State,
    /// Day-log file written when a finished day was logged.
    pub logged: Option<PathBuf>,
    pub report: Report,
}

/// Applies `now` to `state`. When `now` falls on another date than
/// `work.start`, the finished span is returned and the day restarts at `now`.
pub fn advance(state: &mut State, now: NaiveDateTime) -> Option<Span> {
    let finished = if now.date() != state.work.start.date() {
        let finished = state.work;
        state.work.start = now;
        Some(finished)
    } else {
        None
    };
    state.work.end = now;
    finished
}

/// Runs one cycle against `store` and `day_log`. A malformed state file
/// aborts before anything is written.
pub fn run(store: &StateStore, day_log: &DayLog, config: &DayConfig, now: NaiveDateTime) -> Result<Outcome> {
    let mut state = match store.load()? {
        Some(state) => {
            debug!("loaded state from {}", store.path().display());
            state
        }
        None => {
            info!("initializing state at {}", store.path().display());
            State::init(now, config)
        }
    };

    let mut logged = None;
    if let Some(finished) = advance(&mut state, now) {
        info!("day rollover: {} -> {}", finished.start.date(), now.date());
        if state.log {
            logged = Some(day_log.append(&finished, &state.breaks)?);
        }
    }

    store.save(&state)?;

    let report = Report::for_state(&state);
    Ok(Outcome {
        state,
        logged,
        report,
    })
}
