/// Pinned-name lists: one name per line, blank lines ignored
use super::Result;
use itertools::Itertools;
use std::fs;
use std::path::Path;

/// Trim names, drop blanks and collapse repeats, keeping first occurrences.
pub fn normalize_pinned<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty())
        .unique()
        .collect()
}

pub fn parse_pinned(text: &str) -> Vec<String> {
    normalize_pinned(text.lines())
}

pub fn read_pinned_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_pinned(text.trim_start_matches('\u{feff}')))
}
