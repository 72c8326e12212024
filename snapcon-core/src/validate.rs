//! Checks applied to caller input before it reaches a snapper argument vector.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_CONFIG_NAME_LEN: usize = 64;

/// A snapper configuration name that is safe to pass after `-c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigName(String);

impl ConfigName {
    pub fn parse(name: &str) -> Result<Self> {
        let valid = !name.is_empty()
            && name.len() <= MAX_CONFIG_NAME_LEN
            && !name.starts_with('-')
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(Error::InvalidConfigName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ConfigName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConfigName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ConfigName> for String {
    fn from(name: ConfigName) -> Self {
        name.0
    }
}

/// A `from..to` span of snapshots. `0` stands for the live filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRange {
    pub from: u32,
    pub to: u32,
}

impl SnapshotRange {
    pub fn parse(range: &str) -> Result<Self> {
        let invalid = || Error::InvalidRange(range.to_string());
        let (from, to) = range.split_once("..").ok_or_else(invalid)?;

        Ok(Self {
            from: parse_number(from).ok_or_else(invalid)?,
            to: parse_number(to).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for SnapshotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

impl FromStr for SnapshotRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parses a snapshot number. Snapshot 0 is the live system and cannot be
/// addressed by id.
pub fn parse_snapshot_id(id: &str) -> Result<u32> {
    parse_number(id)
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::InvalidSnapshotId(id.to_string()))
}

// `u32::from_str` accepts a leading `+`; snapper does not.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Rejects free text that would not survive as a single argument.
pub fn check_text(field: &str, value: &str) -> Result<()> {
    if value.contains(['\0', '\n', '\r']) {
        return Err(Error::InvalidText(format!(
            "{} contains control characters",
            field
        )));
    }
    Ok(())
}

/// Userdata is a comma separated list of `key=value` pairs.
pub fn check_userdata(value: &str) -> Result<()> {
    check_text("userdata", value)?;
    if !value.contains('=') {
        return Err(Error::InvalidText(format!(
            "userdata must be key=value, got {:?}",
            value
        )));
    }
    Ok(())
}

pub fn check_paths(paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::InvalidPath("no paths given".to_string()));
    }
    for path in paths {
        if !path.starts_with('/') || path.contains('\0') {
            return Err(Error::InvalidPath(path.clone()));
        }
    }
    Ok(())
}
