//! Console report printed after each update.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};

use crate::format::{hours_minutes, TIME_OF_DAY_FORMAT};
use crate::interval::presence;
use crate::projection::project_target_time;
use crate::state::State;

/// Presence so far and the projected time for each target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub presence: TimeDelta,
    /// `(target, projected time)` in the order the targets are configured.
    pub targets: Vec<(TimeDelta, NaiveDateTime)>,
}

impl Report {
    pub fn for_state(state: &State) -> Self {
        let targets = state
            .targets
            .iter()
            .map(|&minutes| {
                let target = TimeDelta::minutes(i64::from(minutes));
                (target, project_target_time(state.work.start, &state.breaks, target))
            })
            .collect();
        Self {
            presence: presence(&state.work, &state.breaks),
            targets,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Presence: {:>5} h", hours_minutes(self.presence))?;
        for (target, at) in &self.targets {
            writeln!(
                f,
                "{:>5} h{:>11}",
                hours_minutes(*target),
                at.format(TIME_OF_DAY_FORMAT).to_string()
            )?;
        }
        Ok(())
    }
}
