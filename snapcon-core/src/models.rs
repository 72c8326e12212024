use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of `snapper list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub pre_id: String,
    pub date: String,
    pub user: String,
    pub cleanup: String,
    pub description: String,
    pub userdata: String,
}

impl Snapshot {
    pub fn is_pre(&self) -> bool {
        self.kind == "pre"
    }

    pub fn is_post(&self) -> bool {
        self.kind == "post"
    }

    /// The paired "pre" snapshot of a "post" snapshot.
    pub fn pre_snapshot(&self) -> Option<u32> {
        self.pre_id.parse().ok()
    }
}

/// Status code of a [`Change`].
///
/// snapper prints a composite `c` for content changes; that collapses to
/// [`ChangeAction::Modified`]. Every other code is kept as emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ChangeAction {
    Modified,
    Code(char),
}

impl ChangeAction {
    pub const MODIFIED: &'static str = "modified";

    pub fn from_code(code: char) -> Self {
        match code {
            'c' => ChangeAction::Modified,
            other => ChangeAction::Code(other),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ChangeAction::Code('+'))
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ChangeAction::Code('-'))
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::Modified => f.write_str(Self::MODIFIED),
            ChangeAction::Code(c) => write!(f, "{}", c),
        }
    }
}

impl From<ChangeAction> for String {
    fn from(action: ChangeAction) -> Self {
        action.to_string()
    }
}

impl From<String> for ChangeAction {
    fn from(s: String) -> Self {
        if s == ChangeAction::MODIFIED {
            return ChangeAction::Modified;
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => ChangeAction::from_code(c),
            _ => ChangeAction::Code('?'),
        }
    }
}

/// One line of `snapper status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub action: ChangeAction,
    pub path: String,
}

/// Output of `snapper get-config`.
pub type Settings = BTreeMap<String, String>;
