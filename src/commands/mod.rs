mod check;
mod display;
mod draw;

pub use check::check;
pub use draw::{draw, DrawArgs};

use colored::*;
use fair_draw::config::{DrawConfig, Overrides};
use fair_draw::formats::{self, pinned::read_pinned_file};
use fair_draw::model::Table;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Options shared by every command that reads the two input tables.
#[derive(Debug, Clone)]
pub struct InputArgs {
    pub registrations: PathBuf,
    pub previous_winners: PathBuf,
    pub config: Option<PathBuf>,
    pub pinned_file: Option<PathBuf>,
    pub overrides: Overrides,
}

impl InputArgs {
    /// The config file (if any) with command-line values applied on top.
    pub fn resolve_config(&self) -> Result<DrawConfig, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => DrawConfig::load(path)
                .map_err(|e| format!("{} ({})", e, path.display()))?,
            None => DrawConfig::default(),
        };

        let mut overrides = self.overrides.clone();
        if let Some(path) = &self.pinned_file {
            let mut from_file = read_pinned_file(path)
                .map_err(|e| format!("Could not read pinned names from {}: {}", path.display(), e))?;
            from_file.append(&mut overrides.pinned);
            overrides.pinned = from_file;
        }

        Ok(config.with_overrides(overrides))
    }

    pub fn load_tables(&self) -> Result<(Table, Table), Box<dyn Error>> {
        Ok((
            load_table(&self.registrations)?,
            load_table(&self.previous_winners)?,
        ))
    }
}

fn load_table(path: &Path) -> Result<Table, Box<dyn Error>> {
    let table = formats::read_table(path)
        .map_err(|e| format!("Could not read {}: {}", path.display(), e))?;

    println!(
        "📂 Loaded {} rows from {}",
        table.len().to_string().bright_yellow(),
        path.display().to_string().bright_cyan()
    );
    Ok(table)
}

fn require_quota(config: &DrawConfig) -> Result<usize, Box<dyn Error>> {
    config
        .quota
        .ok_or_else(|| "A quota is required: pass --quota or set \"quota\" in the config file".into())
}
