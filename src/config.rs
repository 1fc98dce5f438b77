//! Settings used to seed a fresh state file.

use chrono::NaiveTime;

use crate::interval::DailyBreak;

/// Break and target configuration handed to [`crate::state::State::init`].
///
/// Once a state file exists it is the configuration: the user edits breaks,
/// targets and the log flag there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayConfig {
    /// Append a line to the monthly day log when a day is finished.
    pub log: bool,
    pub breaks: Vec<DailyBreak>,
    /// Daily presence goals in minutes.
    pub targets: Vec<u32>,
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

impl Default for DayConfig {
    /// Morning break 09:00–09:15, lunch 12:30–13:00, targets of 8 and 10 hours.
    fn default() -> Self {
        Self {
            log: true,
            breaks: vec![
                DailyBreak::new(hm(9, 0), hm(9, 15)),
                DailyBreak::new(hm(12, 30), hm(13, 0)),
            ],
            targets: vec![480, 600],
        }
    }
}
