//! Guard against destructive operations that climb out of the current view.
//!
//! The default policy compares path lengths only: an operation whose result
//! path is shorter than its source path is rejected. It catches accidental
//! `..` escapes from the UI, nothing more. It does not canonicalize paths
//! and must not be relied on as an access-control boundary.
//!
//! Rejections are not errors. Callers skip the affected item and carry on,
//! so a batch call can succeed while having done nothing for some items.

use std::fmt;

use tracing::warn;

/// Operation being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rename,
    Remove,
    Archive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Rename => "rename",
            Action::Remove => "remove",
            Action::Archive => "archive",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether an operation from `source` to `result` must be skipped.
pub trait SafetyPolicy: Send + Sync {
    /// Returns true when the operation is blocked.
    fn blocked(&self, action: Action, source: &str, result: &str) -> bool;
}

/// Length-based policy: blocks when `source` is longer than `result`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthHeuristic;

impl SafetyPolicy for LengthHeuristic {
    fn blocked(&self, action: Action, source: &str, result: &str) -> bool {
        blocked(action, source, result)
    }
}

/// Length heuristic as a free function. Logs every rejection.
pub fn blocked(action: Action, source: &str, result: &str) -> bool {
    if source.len() > result.len() {
        warn!(
            action = %action,
            source = %source,
            result = %result,
            "Blocked potentially destructive operation"
        );
        return true;
    }

    false
}
