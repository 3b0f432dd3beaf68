use super::display::print_status;
use super::{require_quota, InputArgs};
use colored::*;
use fair_draw::draw::{prepare, Severity};
use std::error::Error;

/// Load and validate the inputs without drawing, and describe the pools.
pub fn check(args: &InputArgs) -> Result<Severity, Box<dyn Error>> {
    let config = args.resolve_config()?;
    let quota = require_quota(&config)?;
    let (registrations, previous_winners) = args.load_tables()?;

    let prepared = prepare(
        &registrations,
        &previous_winners,
        &config.name_column,
        config.group_column.as_deref(),
        quota,
        &config.pinned,
    )?;
    let registrants = &prepared.registrants;

    println!("\n{}", "🔍 Input Check".bright_cyan().bold());
    println!("{}", "=".repeat(50).bright_cyan());
    println!(
        "{}: {} ({} blank, {} duplicate rows dropped)",
        "Registrants".bright_white().bold(),
        registrants.len().to_string().bright_yellow(),
        registrants.dropped_blank(),
        registrants.dropped_duplicate()
    );
    println!(
        "{}: {}",
        "Previous winners".bright_white().bold(),
        prepared.previous_winners.len().to_string().bright_yellow()
    );
    println!(
        "{}: {} eligible, {} backup",
        "Pools".bright_white().bold(),
        prepared.eligible_count().to_string().bright_green(),
        prepared.backup_count().to_string().bright_yellow()
    );
    println!(
        "{}: {}",
        "Pinned".bright_white().bold(),
        if prepared.pinned.is_empty() {
            "none".to_string()
        } else {
            prepared.pinned.join(", ")
        }
    );

    let mut severity = Severity::Success;
    if let Some(group_index) = prepared.columns.group {
        println!("{}", "-".repeat(50).bright_cyan());
        for (group, members) in registrants.partition_by(group_index) {
            let pinned = prepared
                .pinned
                .iter()
                .filter(|name| members.contains(name))
                .count();
            let line = format!(
                "[{}] {} registrants, {} pinned",
                group.bold(),
                members.len(),
                pinned
            );

            if pinned > quota {
                severity = Severity::Warning;
                print_status(
                    Severity::Warning,
                    &format!("{}: pinned names exceed the quota of {}", line, quota),
                );
            } else if members.len() < quota {
                severity = Severity::Warning;
                print_status(
                    Severity::Warning,
                    &format!("{}: fewer registrants than the quota of {}", line, quota),
                );
            } else {
                print_status(Severity::Success, &line);
            }
        }
    } else if registrants.len() < quota {
        severity = Severity::Warning;
        print_status(
            Severity::Warning,
            &format!(
                "Only {} registrants for a quota of {}; the draw will fall short.",
                registrants.len(),
                quota
            ),
        );
    }

    if severity == Severity::Success {
        print_status(Severity::Success, "Inputs are ready to draw.");
    }
    Ok(severity)
}
