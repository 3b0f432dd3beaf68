/// From raw tables to a finished draw: cleaning, validation, then one or many draws
use super::drawer::{draw_registrants, DrawnTable};
use super::groups::{draw_by_group, GroupedDraw};
use super::validator::{
    validate, validate_pinned, validate_pinned_registered, validate_quota, Columns,
};
use super::{Result, Severity, Shuffler};
use crate::formats::pinned::normalize_pinned;
use crate::model::{names_in_column, NameSet, RegistrantSet, Table};
use tracing::{debug, warn};

/// Cleaned and validated inputs, ready to draw from.
#[derive(Debug, Clone)]
pub struct PreparedDraw {
    pub registrants: RegistrantSet,
    pub previous_winners: NameSet,
    pub columns: Columns,
    pub quota: usize,
    pub pinned: Vec<String>,
}

/// Clean both tables and run every check that does not need randomness.
///
/// Without a group column the pinned names are checked against the quota
/// here. With one, that check is left to each group's draw.
pub fn prepare(
    registrations: &Table,
    previous_winners: &Table,
    name_column: &str,
    group_column: Option<&str>,
    quota: usize,
    pinned: &[String],
) -> Result<PreparedDraw> {
    let columns = validate(registrations, previous_winners, name_column, group_column)?;
    validate_quota(quota)?;

    let registrants = RegistrantSet::clean(registrations, columns.registrant_name);
    if registrants.dropped_blank() > 0 || registrants.dropped_duplicate() > 0 {
        warn!(
            blank = registrants.dropped_blank(),
            duplicate = registrants.dropped_duplicate(),
            "dropped registration rows"
        );
    }
    let previous = names_in_column(previous_winners, columns.previous_name);
    debug!(
        registrants = registrants.len(),
        previous_winners = previous.len(),
        "cleaned inputs"
    );

    let pinned = normalize_pinned(pinned);
    if columns.group.is_some() {
        validate_pinned_registered(&pinned, &registrants)?;
    } else {
        validate_pinned(&pinned, &registrants, quota)?;
    }

    Ok(PreparedDraw {
        registrants,
        previous_winners: previous,
        columns,
        quota,
        pinned,
    })
}

#[derive(Debug, Clone)]
pub enum DrawResult {
    Single(DrawnTable),
    Grouped(GroupedDraw),
}

impl DrawResult {
    pub fn winners(&self) -> &Table {
        match self {
            DrawResult::Single(drawn) => &drawn.table,
            DrawResult::Grouped(grouped) => &grouped.winners,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DrawResult::Single(drawn) => drawn.outcome.status.severity(),
            DrawResult::Grouped(grouped) => grouped.severity(),
        }
    }

    /// The single draw's status, or the grouped summary.
    pub fn message(&self) -> String {
        match self {
            DrawResult::Single(drawn) => drawn.outcome.status.to_string(),
            DrawResult::Grouped(grouped) => grouped.summary(),
        }
    }
}

impl PreparedDraw {
    pub fn is_grouped(&self) -> bool {
        self.columns.group.is_some()
    }

    /// Unpinned registrants who did not win last time, over the whole roster.
    pub fn eligible_count(&self) -> usize {
        self.unpinned()
            .filter(|name| !self.previous_winners.contains(*name))
            .count()
    }

    /// Unpinned registrants who won last time.
    pub fn backup_count(&self) -> usize {
        self.unpinned()
            .filter(|name| self.previous_winners.contains(*name))
            .count()
    }

    fn unpinned(&self) -> impl Iterator<Item = &String> + '_ {
        self.registrants
            .iter()
            .map(|r| &r.name)
            .filter(move |name| !self.pinned.contains(name))
    }

    pub fn run<S: Shuffler + ?Sized>(&self, shuffler: &mut S) -> Result<DrawResult> {
        match self.columns.group {
            Some(group_index) => Ok(DrawResult::Grouped(draw_by_group(
                &self.registrants,
                &self.previous_winners,
                self.quota,
                &self.pinned,
                group_index,
                shuffler,
            ))),
            None => Ok(DrawResult::Single(draw_registrants(
                &self.registrants,
                &self.previous_winners,
                self.quota,
                &self.pinned,
                shuffler,
            )?)),
        }
    }
}
