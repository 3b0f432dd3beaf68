/// Structural and pinned-name checks that run before any randomness is used
use super::{DrawError, Result, TableRole};
use crate::model::{RegistrantSet, Table};

/// Column positions resolved by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub registrant_name: usize,
    pub previous_name: usize,
    pub group: Option<usize>,
}

/// Check that the name column exists in both tables, and the group column
/// (when grouping) in the registration table.
pub fn validate(
    registrants: &Table,
    previous_winners: &Table,
    name_column: &str,
    group_column: Option<&str>,
) -> Result<Columns> {
    let missing = |column: &str, table: TableRole| DrawError::MissingColumn {
        column: column.to_string(),
        table,
    };

    let registrant_name = registrants
        .column_index(name_column)
        .ok_or_else(|| missing(name_column, TableRole::Registrations))?;
    let previous_name = previous_winners
        .column_index(name_column)
        .ok_or_else(|| missing(name_column, TableRole::PreviousWinners))?;
    let group = match group_column {
        Some(column) => Some(
            registrants
                .column_index(column)
                .ok_or_else(|| missing(column, TableRole::Registrations))?,
        ),
        None => None,
    };

    Ok(Columns {
        registrant_name,
        previous_name,
        group,
    })
}

pub fn validate_quota(quota: usize) -> Result<()> {
    if quota == 0 {
        return Err(DrawError::ZeroQuota);
    }
    Ok(())
}

/// Every pinned name must be registered. All unknown names are reported at once.
pub fn validate_pinned_registered(pinned: &[String], registrants: &RegistrantSet) -> Result<()> {
    let unknown: Vec<String> = pinned
        .iter()
        .filter(|name| !registrants.contains(name))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        return Err(DrawError::UnknownPinned(unknown));
    }
    Ok(())
}

/// Pinned names must be registered and must fit within the quota.
pub fn validate_pinned(pinned: &[String], registrants: &RegistrantSet, quota: usize) -> Result<()> {
    validate_pinned_registered(pinned, registrants)?;

    if pinned.len() > quota {
        return Err(DrawError::PinnedExceedsQuota {
            pinned: pinned.len(),
            quota,
        });
    }
    Ok(())
}
