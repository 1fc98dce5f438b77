//! Error type shared by every worktime module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed state file {path}: {source}")]
    ParseState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode state: {0}")]
    EncodeState(#[source] serde_json::Error),

    #[error("cannot write state file {path}: {source}")]
    WriteState {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot append to day log {path}: {source}")]
    AppendLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read day log {path}: {source}")]
    ReadLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report: {0}")]
    Output(#[source] io::Error),

    #[error("could not parse time {0:?} (expected YYYY-MM-DDTHH:MM)")]
    InvalidTime(String),

    #[error("could not parse month {0:?} (expected YYYY_MM, YYYY-MM or MM)")]
    InvalidMonth(String),

    #[error("could not determine the install directory: {0}")]
    InstallDir(#[source] io::Error),
}
