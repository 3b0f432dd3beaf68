//! Audit reports: a JSON record of how a draw was made and what it produced.

use crate::draw::{DrawOutcome, DrawResult, Severity};
use crate::util::file_digest;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    pub path: String,
    pub sha1: String,
}

impl InputFile {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        Ok(Self {
            path: path.display().to_string(),
            sha1: file_digest(path)?,
        })
    }
}

/// The settings a draw was run with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawContext {
    pub seed: u64,
    pub registrations: InputFile,
    pub previous_winners: InputFile,
    pub name_column: String,
    pub group_column: Option<String>,
    pub quota: usize,
    pub pinned: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    pub group: String,
    pub registrants: usize,
    pub pinned: Vec<String>,
    pub severity: Severity,
    pub message: String,
    pub outcome: Option<DrawOutcome>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawReport {
    pub generated_at: DateTime<Local>,
    #[serde(flatten)]
    pub context: DrawContext,
    pub severity: Severity,
    pub message: String,
    /// Winner names in output row order.
    pub winners: Vec<String>,
    /// Set for a single draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DrawOutcome>,
    /// Set for a grouped draw, one entry per group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupEntry>,
}

impl DrawReport {
    pub fn new(context: DrawContext, result: &DrawResult, name_index: usize) -> Self {
        let winners = result
            .winners()
            .rows
            .iter()
            .filter_map(|row| row.get(name_index).cloned())
            .collect();

        let (outcome, groups) = match result {
            DrawResult::Single(drawn) => (Some(drawn.outcome.clone()), Vec::new()),
            DrawResult::Grouped(grouped) => (
                None,
                grouped
                    .groups
                    .iter()
                    .map(|group| GroupEntry {
                        group: group.group.clone(),
                        registrants: group.registrants,
                        pinned: group.pinned.clone(),
                        severity: group.severity(),
                        message: group.message(),
                        outcome: group.outcome.as_ref().ok().cloned(),
                    })
                    .collect(),
            ),
        };

        Self {
            generated_at: Local::now(),
            context,
            severity: result.severity(),
            message: result.message(),
            winners,
            outcome,
            groups,
        }
    }
}
