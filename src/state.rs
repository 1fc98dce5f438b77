//! The persisted state record and its JSON file.
//!
//! ```json
//! {
//!   "log": true,
//!   "work": { "start": "2024-03-05T07:58", "end": "2024-03-05T16:41" },
//!   "breaks": [ { "start": "09:00", "end": "09:15" }, { "start": "12:30", "end": "13:00" } ],
//!   "targets": [ 480, 600 ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::DayConfig;
use crate::error::{Error, Result};
use crate::interval::{DailyBreak, Span};

/// State file name inside the storage directory.
pub const STATE_FILE: &str = "timeStash.json";

/// Everything carried from one invocation to the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub log: bool,
    pub work: Span,
    pub breaks: Vec<DailyBreak>,
    pub targets: Vec<u32>,
}

impl State {
    /// Fresh state whose work span starts and ends at `now`.
    pub fn init(now: NaiveDateTime, config: &DayConfig) -> Self {
        Self {
            log: config.log,
            work: Span::new(now, now),
            breaks: config.breaks.clone(),
            targets: config.targets.clone(),
        }
    }
}

/// Reads and writes [`State`] at a fixed path.
#[derive(Clone, Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store for [`STATE_FILE`] under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored state. A missing or unreadable file is `Ok(None)`;
    /// content that is not a valid state record is an error.
    pub fn load(&self) -> Result<Option<State>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no state file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                warn!("cannot read {}: {}; starting from defaults", self.path.display(), e);
                return Ok(None);
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| Error::ParseState {
                path: self.path.clone(),
                source,
            })
    }

    /// Writes `state` to a sibling temp file and renames it into place.
    pub fn save(&self, state: &State) -> Result<()> {
        let mut json = serde_json::to_string_pretty(state).map_err(Error::EncodeState)?;
        json.push('\n');
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| Error::WriteState {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| Error::WriteState {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| Error::WriteState {
            path: self.path.clone(),
            source,
        })?;
        debug!("wrote {}", self.path.display());
        Ok(())
    }
}
