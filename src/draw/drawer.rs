/// Pool partitioning and quota fulfilment for a single draw
use super::validator::{validate_pinned, validate_quota};
use super::{Result, Severity, Shuffler};
use crate::model::{NameSet, RegistrantSet, Table};
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// The quota could not be met even after drawing from the backup pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub total_registrants: usize,
    pub quota: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawStatus {
    /// The quota was met without touching the backup pool.
    Success { drawn: usize },
    /// Pinned names alone met the quota; nothing was drawn.
    PinnedFilledQuota { pinned: usize },
    /// The eligible pool ran out. Backup names were used if there were any,
    /// and `shortfall` is set when even that was not enough.
    PartialFill {
        eligible_drawn: usize,
        backup_drawn: usize,
        shortfall: Option<Shortfall>,
    },
}

impl DrawStatus {
    pub fn severity(&self) -> Severity {
        match self {
            DrawStatus::Success { .. } | DrawStatus::PinnedFilledQuota { .. } => Severity::Success,
            DrawStatus::PartialFill { .. } => Severity::Warning,
        }
    }

    pub fn shortfall(&self) -> Option<Shortfall> {
        match self {
            DrawStatus::PartialFill { shortfall, .. } => *shortfall,
            _ => None,
        }
    }
}

impl fmt::Display for DrawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStatus::Success { drawn } => write!(f, "Drew {} winners.", drawn),
            DrawStatus::PinnedFilledQuota { pinned } => {
                write!(f, "All {} places were filled by pinned names.", pinned)
            }
            DrawStatus::PartialFill {
                eligible_drawn,
                backup_drawn,
                shortfall,
            } => {
                write!(
                    f,
                    "Not enough new registrants: drew {} who did not win last time",
                    eligible_drawn
                )?;
                if *backup_drawn > 0 {
                    write!(f, " and topped up {} from last time's winners", backup_drawn)?;
                }
                write!(f, ".")?;
                if let Some(shortfall) = shortfall {
                    write!(
                        f,
                        " Only {} registrants for a quota of {}; the quota could not be filled.",
                        shortfall.total_registrants, shortfall.quota
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawOutcome {
    /// Pinned names first, then eligible draws, then backup draws.
    pub winners: Vec<String>,
    pub pinned: usize,
    pub eligible_pool: usize,
    pub backup_pool: usize,
    pub eligible_drawn: usize,
    pub backup_drawn: usize,
    pub status: DrawStatus,
}

/// Draw up to `quota` winners from `registrants`.
///
/// `pinned` must already be validated: registered, free of duplicates and no
/// longer than `quota`. Names not pinned are split into an eligible pool (not
/// in `previous_winners`) and a backup pool (in it). Each pool is shuffled
/// once, and the quota is filled from the front of the eligible pool before
/// any backup name is taken. A quota of 0 with nothing pinned draws nobody
/// and reports `Success { drawn: 0 }`.
pub fn draw<S: Shuffler + ?Sized>(
    registrants: &[String],
    previous_winners: &NameSet,
    quota: usize,
    pinned: &[String],
    shuffler: &mut S,
) -> DrawOutcome {
    let mut winners = pinned.to_vec();

    let pinned_set: HashSet<&str> = pinned.iter().map(String::as_str).collect();
    let (mut eligible, mut backup): (Vec<String>, Vec<String>) = registrants
        .iter()
        .unique()
        .filter(|name| !pinned_set.contains(name.as_str()))
        .cloned()
        .partition(|name| !previous_winners.contains(name));
    let (eligible_pool, backup_pool) = (eligible.len(), backup.len());

    debug!(
        pinned = pinned.len(),
        eligible_pool, backup_pool, quota, "partitioned draw pool"
    );

    if !pinned.is_empty() && pinned.len() >= quota {
        return DrawOutcome {
            winners,
            pinned: pinned.len(),
            eligible_pool,
            backup_pool,
            eligible_drawn: 0,
            backup_drawn: 0,
            status: DrawStatus::PinnedFilledQuota {
                pinned: pinned.len(),
            },
        };
    }
    let mut remaining = quota - pinned.len();

    shuffler.shuffle(&mut eligible);
    shuffler.shuffle(&mut backup);

    let eligible_drawn = remaining.min(eligible.len());
    winners.extend(eligible.drain(..eligible_drawn));
    remaining -= eligible_drawn;

    if remaining == 0 {
        return DrawOutcome {
            status: DrawStatus::Success {
                drawn: winners.len(),
            },
            winners,
            pinned: pinned.len(),
            eligible_pool,
            backup_pool,
            eligible_drawn,
            backup_drawn: 0,
        };
    }

    let backup_drawn = remaining.min(backup.len());
    winners.extend(backup.drain(..backup_drawn));
    remaining -= backup_drawn;

    DrawOutcome {
        winners,
        pinned: pinned.len(),
        eligible_pool,
        backup_pool,
        eligible_drawn,
        backup_drawn,
        status: DrawStatus::PartialFill {
            eligible_drawn,
            backup_drawn,
            shortfall: (remaining > 0).then(|| Shortfall {
                total_registrants: registrants.len(),
                quota,
            }),
        },
    }
}

/// Winners of one draw as rows of the registration table.
#[derive(Debug, Clone)]
pub struct DrawnTable {
    pub table: Table,
    pub outcome: DrawOutcome,
}

/// Validate the quota and pinned names against a cleaned roster, draw, and
/// return the winning rows in roster order.
pub fn draw_registrants<S: Shuffler + ?Sized>(
    registrants: &RegistrantSet,
    previous_winners: &NameSet,
    quota: usize,
    pinned: &[String],
    shuffler: &mut S,
) -> Result<DrawnTable> {
    validate_quota(quota)?;
    validate_pinned(pinned, registrants, quota)?;

    let outcome = draw(
        &registrants.names(),
        previous_winners,
        quota,
        pinned,
        shuffler,
    );
    let table = registrants.select(&outcome.winners);

    Ok(DrawnTable { table, outcome })
}
