//! Winner selection: validation, pool partitioning and per-group draws.

pub mod drawer;
pub mod groups;
pub mod session;
pub mod shuffle;
pub mod validator;

pub use drawer::{draw, draw_registrants, DrawOutcome, DrawStatus, DrawnTable, Shortfall};
pub use groups::{draw_by_group, GroupReport, GroupedDraw};
pub use session::{prepare, DrawResult, PreparedDraw};
pub use shuffle::{RandomShuffler, Shuffler};
pub use validator::{validate, validate_pinned, validate_pinned_registered, validate_quota, Columns};

use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Which input table a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableRole {
    Registrations,
    PreviousWinners,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Registrations => write!(f, "registration table"),
            TableRole::PreviousWinners => write!(f, "previous winners table"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("column '{column}' was not found in the {table}")]
    MissingColumn { column: String, table: TableRole },
    #[error("pinned names are not registered for this draw: {}", .0.iter().join(", "))]
    UnknownPinned(Vec<String>),
    #[error("{pinned} pinned names exceed the quota of {quota}")]
    PinnedExceedsQuota { pinned: usize, quota: usize },
    #[error("the quota must be at least 1")]
    ZeroQuota,
}

pub type Result<T> = std::result::Result<T, DrawError>;

/// How a status should be presented to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
