//! Monthly day logs.
//!
//! One file per month, `YYYY_MM.csv` in the storage directory, one line per
//! finished day:
//!
//! `DD.MM.YYYY;HH:MM;HH:MM;H:MM` (date, first seen, last seen, presence)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::format::{hours_minutes, TIME_OF_DAY_FORMAT};
use crate::interval::{presence, DailyBreak, Span};

/// A calendar month selecting one log file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses `YYYY_MM`, `YYYY-MM` or `MM`; a bare month is taken from `today`'s year.
    pub fn parse(arg: &str, today: NaiveDate) -> Result<Self> {
        static MONTH_RE: OnceLock<Regex> = OnceLock::new();
        let re = MONTH_RE.get_or_init(|| {
            Regex::new(r"^(?:(\d{4})[_-])?(\d{1,2})$").expect("month pattern is valid")
        });
        let invalid = || Error::InvalidMonth(arg.to_string());
        let caps = re.captures(arg.trim()).ok_or_else(invalid)?;
        let year = match caps.get(1) {
            Some(y) => y.as_str().parse().map_err(|_| invalid())?,
            None => today.year(),
        };
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    pub fn file_name(&self) -> String {
        format!("{:04}_{:02}.csv", self.year, self.month)
    }
}

/// One parsed day-log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub presence: TimeDelta,
}

/// Formats the log line for a finished day, newline included.
pub fn format_entry(work: &Span, breaks: &[DailyBreak]) -> String {
    format!(
        "{};{};{}\n",
        work.start.format("%d.%m.%Y;%H:%M"),
        work.end.format(TIME_OF_DAY_FORMAT),
        hours_minutes(presence(work, breaks))
    )
}

/// Parses a line written by [`format_entry`]; `None` for anything else.
pub fn parse_entry(line: &str) -> Option<DayEntry> {
    static ENTRY_RE: OnceLock<Regex> = OnceLock::new();
    let re = ENTRY_RE.get_or_init(|| {
        Regex::new(r"^(\d{2}\.\d{2}\.\d{4});(\d{1,2}:\d{2});(\d{1,2}:\d{2});(-?)(\d+):(\d{2})$")
            .expect("entry pattern is valid")
    });
    let caps = re.captures(line.trim())?;
    let date = NaiveDate::parse_from_str(&caps[1], "%d.%m.%Y").ok()?;
    let start = NaiveTime::parse_from_str(&caps[2], TIME_OF_DAY_FORMAT).ok()?;
    let end = NaiveTime::parse_from_str(&caps[3], TIME_OF_DAY_FORMAT).ok()?;
    let hours: i64 = caps[5].parse().ok()?;
    let minutes: i64 = caps[6].parse().ok()?;
    let mut presence = TimeDelta::try_minutes(hours.checked_mul(60)?.checked_add(minutes)?)?;
    if &caps[4] == "-" {
        presence = -presence;
    }
    Some(DayEntry {
        date,
        start,
        end,
        presence,
    })
}

/// The monthly log files in one directory.
#[derive(Clone, Debug)]
pub struct DayLog {
    dir: PathBuf,
}

impl DayLog {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, month: Month) -> PathBuf {
        self.dir.join(month.file_name())
    }

    /// Appends the entry for `work` to the file of `work.start`'s month; returns that file.
    pub fn append(&self, work: &Span, breaks: &[DailyBreak]) -> Result<PathBuf> {
        let path = self.path_for(Month::of(work.start.date()));
        let line = format_entry(work, breaks);
        let append_err = |source| Error::AppendLog {
            path: path.clone(),
            source,
        };
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(append_err)?;
        f.write_all(line.as_bytes()).map_err(append_err)?;
        debug!("appended {:?} to {}", line.trim_end(), path.display());
        Ok(path)
    }

    /// Entries of `month` in file order, or `None` when that month has no file.
    pub fn read_month(&self, month: Month) -> Result<Option<Vec<DayEntry>>> {
        let path = self.path_for(month);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Error::ReadLog { path, source }),
        };
        let mut entries = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_entry(line) {
                Some(entry) => entries.push(entry),
                None => debug!("{}:{}: skipping {:?}", path.display(), i + 1, line),
            }
        }
        Ok(Some(entries))
    }
}
