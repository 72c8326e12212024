use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", describe_code(.code))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} timed out after {after:?}")]
    TimedOut { program: String, after: Duration },

    #[error("Invalid config name: {0}")]
    InvalidConfigName(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid snapshot id: {0}")]
    InvalidSnapshotId(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid text argument: {0}")]
    InvalidText(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl Error {
    /// True for errors raised while validating caller input, before anything was spawned.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfigName(_)
                | Error::InvalidRange(_)
                | Error::InvalidSnapshotId(_)
                | Error::InvalidPath(_)
                | Error::InvalidText(_)
        )
    }
}
