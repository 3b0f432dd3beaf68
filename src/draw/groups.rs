/// Independent per-group draws sharing one previous-winner set
use super::drawer::{draw_registrants, DrawOutcome};
use super::{DrawError, Severity, Shuffler};
use crate::model::{NameSet, RegistrantSet, Table};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct GroupReport {
    pub group: String,
    pub registrants: usize,
    /// Pinned names registered in this group.
    pub pinned: Vec<String>,
    pub outcome: Result<DrawOutcome, DrawError>,
}

impl GroupReport {
    pub fn severity(&self) -> Severity {
        match &self.outcome {
            Ok(outcome) => outcome.status.severity(),
            Err(_) => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(outcome) => outcome.status.to_string(),
            Err(err) => err.to_string(),
        }
    }

    pub fn winners(&self) -> usize {
        self.outcome
            .as_ref()
            .map(|outcome| outcome.winners.len())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct GroupedDraw {
    /// Winning rows of every successful group, group by group.
    pub winners: Table,
    pub groups: Vec<GroupReport>,
    pub per_group_quota: usize,
}

impl GroupedDraw {
    pub fn failed_groups(&self) -> usize {
        self.groups.iter().filter(|g| g.outcome.is_err()).count()
    }

    /// Failed groups and empty results are warnings; the draw as a whole
    /// never fails once the inputs have been validated.
    pub fn severity(&self) -> Severity {
        if self.winners.is_empty()
            || self
                .groups
                .iter()
                .any(|group| group.severity() != Severity::Success)
        {
            Severity::Warning
        } else {
            Severity::Success
        }
    }

    pub fn summary(&self) -> String {
        if self.groups.is_empty() {
            return "No groups were found in the registration table; nothing was drawn."
                .to_string();
        }
        if self.winners.is_empty() {
            return format!(
                "No winners were drawn in any of the {} groups.",
                self.groups.len()
            );
        }

        let mut summary = format!(
            "Drew {} winners across {} groups.",
            self.winners.len(),
            self.groups.len() - self.failed_groups()
        );
        if self.failed_groups() > 0 {
            summary.push_str(&format!(
                " {} of {} groups were rejected and have no winners.",
                self.failed_groups(),
                self.groups.len()
            ));
        }
        summary
    }
}

/// Run one draw per distinct value of the group column.
///
/// Every group gets `per_group_quota` places and the pinned names that are
/// registered in it. Eligibility is judged against the same
/// `previous_winners` set in every group. A group whose pinned names exceed
/// the quota is reported and skipped; the others still draw.
///
/// Pinned names should be checked against the whole roster first, since a
/// name registered in no group is silently ignored here.
pub fn draw_by_group<S: Shuffler + ?Sized>(
    registrants: &RegistrantSet,
    previous_winners: &NameSet,
    per_group_quota: usize,
    pinned: &[String],
    group_index: usize,
    shuffler: &mut S,
) -> GroupedDraw {
    let mut winners = Table {
        headers: registrants.headers().to_vec(),
        rows: Vec::new(),
    };
    let mut groups = Vec::new();

    for (group, members) in registrants.partition_by(group_index) {
        let pinned_in_group: Vec<String> = pinned
            .iter()
            .filter(|name| members.contains(name))
            .cloned()
            .collect();

        let outcome = match draw_registrants(
            &members,
            previous_winners,
            per_group_quota,
            &pinned_in_group,
            shuffler,
        ) {
            Ok(drawn) => {
                info!(
                    group = %group,
                    registrants = members.len(),
                    winners = drawn.table.len(),
                    "group drawn"
                );
                winners.rows.extend(drawn.table.rows);
                Ok(drawn.outcome)
            }
            Err(err) => {
                warn!(group = %group, error = %err, "group draw rejected");
                Err(err)
            }
        };

        groups.push(GroupReport {
            group,
            registrants: members.len(),
            pinned: pinned_in_group,
            outcome,
        });
    }

    GroupedDraw {
        winners,
        groups,
        per_group_quota,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawStatus;

    fn roster(rows: &[(&str, &str)]) -> RegistrantSet {
        let table = Table::new(
            vec!["name".to_string(), "class".to_string()],
            rows.iter()
                .map(|(name, class)| vec![name.to_string(), class.to_string()])
                .collect(),
        );
        RegistrantSet::clean(&table, 0)
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn keep_order(_: &mut [String]) {}

    #[test]
    fn each_group_gets_its_own_quota() {
        let registrants = roster(&[
            ("a1", "X"),
            ("b1", "Y"),
            ("a2", "X"),
            ("b2", "Y"),
            ("a3", "X"),
            ("b3", "Y"),
            ("b4", "Y"),
            ("b5", "Y"),
        ]);

        let result = draw_by_group(&registrants, &NameSet::new(), 2, &[], 1, &mut keep_order);

        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].group, "X");
        assert_eq!(result.groups[0].registrants, 3);
        assert_eq!(result.groups[1].registrants, 5);
        assert_eq!(result.winners.rows.len(), 4);
        assert_eq!(
            result.winners.rows,
            vec![
                vec!["a1", "X"],
                vec!["a2", "X"],
                vec!["b1", "Y"],
                vec!["b2", "Y"]
            ]
        );
        assert_eq!(result.severity(), Severity::Success);
        assert_eq!(result.summary(), "Drew 4 winners across 2 groups.");
    }

    #[test]
    fn previous_winners_apply_in_every_group() {
        let registrants = roster(&[("a1", "X"), ("a2", "X"), ("b1", "Y"), ("b2", "Y")]);
        let previous: NameSet = names(&["a1", "b1"]).into_iter().collect();

        let result = draw_by_group(&registrants, &previous, 1, &[], 1, &mut keep_order);

        assert_eq!(
            result.winners.rows,
            vec![vec!["a2", "X"], vec!["b2", "Y"]]
        );
    }

    #[test]
    fn pinned_names_follow_their_group() {
        let registrants = roster(&[("a1", "X"), ("a2", "X"), ("b1", "Y"), ("b2", "Y")]);

        let result = draw_by_group(
            &registrants,
            &NameSet::new(),
            1,
            &names(&["b2"]),
            1,
            &mut keep_order,
        );

        assert!(result.groups[0].pinned.is_empty());
        assert_eq!(result.groups[1].pinned, names(&["b2"]));
        assert_eq!(
            result.groups[1].outcome.as_ref().unwrap().status,
            DrawStatus::PinnedFilledQuota { pinned: 1 }
        );
        assert_eq!(
            result.winners.rows,
            vec![vec!["a1", "X"], vec!["b2", "Y"]]
        );
    }

    #[test]
    fn failing_group_does_not_stop_the_others() {
        let registrants = roster(&[("a1", "X"), ("a2", "X"), ("b1", "Y"), ("b2", "Y")]);

        let result = draw_by_group(
            &registrants,
            &NameSet::new(),
            1,
            &names(&["a1", "a2"]),
            1,
            &mut keep_order,
        );

        assert_eq!(
            result.groups[0].outcome,
            Err(DrawError::PinnedExceedsQuota {
                pinned: 2,
                quota: 1
            })
        );
        assert_eq!(result.groups[0].severity(), Severity::Error);
        assert_eq!(result.groups[1].winners(), 1);
        assert_eq!(result.winners.rows, vec![vec!["b1", "Y"]]);
        assert_eq!(result.severity(), Severity::Warning);
        assert_eq!(
            result.summary(),
            "Drew 1 winners across 1 groups. 1 of 2 groups were rejected and have no winners."
        );
    }

    #[test]
    fn all_groups_failing_is_not_fatal() {
        let registrants = roster(&[("a1", "X"), ("b1", "Y")]);

        let result = draw_by_group(&registrants, &NameSet::new(), 0, &[], 1, &mut keep_order);

        assert!(result.winners.is_empty());
        assert_eq!(result.winners.headers, vec!["name", "class"]);
        assert_eq!(result.failed_groups(), 2);
        assert_eq!(result.severity(), Severity::Warning);
        assert_eq!(
            result.summary(),
            "No winners were drawn in any of the 2 groups."
        );
    }

    #[test]
    fn empty_roster_has_no_groups() {
        let registrants = roster(&[]);
        let result = draw_by_group(&registrants, &NameSet::new(), 2, &[], 1, &mut keep_order);

        assert!(result.groups.is_empty());
        assert!(result.summary().starts_with("No groups were found"));
    }
}
