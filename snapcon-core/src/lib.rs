//! # snapcon-core
//!
//! Core library for snapcon - running snapper and turning its text output
//! into typed records.
//!
//! snapper's tables are not a stable format: the column separator depends on
//! locale, newer releases add columns, and the status block in `snapper status`
//! has changed width over time. The parsers here accept all known variants and
//! drop rows they cannot make sense of instead of failing.

pub mod args;
pub mod configs;
pub mod error;
pub mod invoke;
pub mod models;
pub mod parse;
pub mod snapper;
pub mod strategy;
pub mod table;
pub mod validate;

pub use configs::ConfigSource;
pub use error::{Error, Result};
pub use invoke::{CommandOutput, CommandRunner, SystemRunner};
pub use models::{Change, ChangeAction, Settings, Snapshot};
pub use snapper::Snapper;
pub use validate::{ConfigName, SnapshotRange};
