/// Tabular inputs and the cleaned registrant roster built from them
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Names of previous-round winners. Only used for membership tests.
pub type NameSet = HashSet<String>;

/// A row-oriented table with named columns, as read from a spreadsheet or CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table with exactly one cell per header in every row. Short
    /// rows are padded with empty cells and cells past the last header are
    /// dropped.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Table {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Table { headers, rows }
    }

    /// An empty table with the same columns.
    pub fn empty_like(&self) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Collect the trimmed, non-blank values of a column.
pub fn names_in_column(table: &Table, column: usize) -> NameSet {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub name: String,
    /// The full input row, with the name cell already trimmed.
    pub row: Vec<String>,
}

/// Registrants of the current round, keyed by name.
///
/// Rows whose name is blank after trimming are dropped, and only the first
/// row for each name is kept. Iteration follows input order.
#[derive(Debug, Clone)]
pub struct RegistrantSet {
    headers: Vec<String>,
    name_index: usize,
    registrants: Vec<Registrant>,
    positions: HashMap<String, usize>,
    dropped_blank: usize,
    dropped_duplicate: usize,
}

impl RegistrantSet {
    pub fn clean(table: &Table, name_index: usize) -> RegistrantSet {
        let mut set = RegistrantSet {
            headers: table.headers.clone(),
            name_index,
            registrants: Vec::new(),
            positions: HashMap::new(),
            dropped_blank: 0,
            dropped_duplicate: 0,
        };

        for row in &table.rows {
            let name = row
                .get(name_index)
                .map(|cell| cell.trim())
                .unwrap_or_default();

            if name.is_empty() {
                set.dropped_blank += 1;
                continue;
            }
            if set.positions.contains_key(name) {
                set.dropped_duplicate += 1;
                continue;
            }

            let mut row = row.clone();
            row.resize(set.headers.len(), String::new());
            row[name_index] = name.to_string();
            set.push(Registrant {
                name: name.to_string(),
                row,
            });
        }

        set
    }

    /// A single-column roster, for callers that only have names.
    pub fn from_names<I, S>(names: I) -> RegistrantSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = names.into_iter().map(|name| vec![name.into()]).collect();
        RegistrantSet::clean(&Table::new(vec!["name".to_string()], rows), 0)
    }

    fn push(&mut self, registrant: Registrant) {
        self.positions
            .insert(registrant.name.clone(), self.registrants.len());
        self.registrants.push(registrant);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn name_index(&self) -> usize {
        self.name_index
    }

    pub fn len(&self) -> usize {
        self.registrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrants.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Registrant> {
        self.positions.get(name).map(|&i| &self.registrants[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registrant> {
        self.registrants.iter()
    }

    /// Names in input order.
    pub fn names(&self) -> Vec<String> {
        self.registrants.iter().map(|r| r.name.clone()).collect()
    }

    /// Rows dropped because the name cell was blank.
    pub fn dropped_blank(&self) -> usize {
        self.dropped_blank
    }

    /// Rows dropped because an earlier row had the same name.
    pub fn dropped_duplicate(&self) -> usize {
        self.dropped_duplicate
    }

    /// Rows of the given registrants, in roster order. Unknown names are ignored.
    pub fn select(&self, names: &[String]) -> Table {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let rows = self
            .registrants
            .iter()
            .filter(|r| wanted.contains(r.name.as_str()))
            .map(|r| r.row.clone())
            .collect();

        Table {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Split the roster on the trimmed value of a column. Groups appear in the
    /// order their first member appears; members keep roster order.
    pub fn partition_by(&self, column: usize) -> Vec<(String, RegistrantSet)> {
        let mut groups: Vec<(String, RegistrantSet)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for registrant in &self.registrants {
            let key = registrant
                .row
                .get(column)
                .map(|cell| cell.trim().to_string())
                .unwrap_or_default();

            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push((
                    key,
                    RegistrantSet {
                        headers: self.headers.clone(),
                        name_index: self.name_index,
                        registrants: Vec::new(),
                        positions: HashMap::new(),
                        dropped_blank: 0,
                        dropped_duplicate: 0,
                    },
                ));
                groups.len() - 1
            });
            groups[slot].1.push(registrant.clone());
        }

        groups
    }
}
