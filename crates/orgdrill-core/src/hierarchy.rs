//! Hierarchy rows and the table they are loaded into

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::{DEFAULT_DELIMITER, DEFAULT_PATH_COLUMN, MAX_DEPTH};

/// How the path column of a source table is located and split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyOptions {
    /// Header name of the column holding the delimited path
    pub path_column: String,
    /// Separator between path segments (default: `/`)
    pub delimiter: char,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            path_column: DEFAULT_PATH_COLUMN.to_string(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// One source record with its path decomposed into levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRow {
    levels: [Option<String>; MAX_DEPTH],
    cells: Vec<String>,
}

impl HierarchyRow {
    /// Build a row from its cells, splitting `cells[path_column]` on `delimiter`
    pub fn new(cells: Vec<String>, path_column: usize, delimiter: char) -> Self {
        let levels = match cells.get(path_column) {
            Some(raw) => split_levels(raw, delimiter),
            None => Default::default(),
        };
        Self { levels, cells }
    }

    /// Label at a 0-based level, `None` when the level is absent
    pub fn level(&self, index: usize) -> Option<&str> {
        self.levels.get(index).and_then(|l| l.as_deref())
    }

    /// All levels, absent ones as `None`
    pub fn levels(&self) -> &[Option<String>] {
        &self.levels
    }

    /// Every cell of the source record, as text
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Whether levels `0..path.len()` equal `path`
    pub fn matches_prefix<S: AsRef<str>>(&self, path: &[S]) -> bool {
        path.len() <= MAX_DEPTH
            && path
                .iter()
                .enumerate()
                .all(|(i, label)| self.level(i) == Some(label.as_ref()))
    }

    /// Whether no level at or after `depth` is populated
    pub fn terminates_at(&self, depth: usize) -> bool {
        self.levels.iter().skip(depth).all(Option::is_none)
    }
}

/// Split a raw path string into positional levels.
///
/// Empty segments are absent and segments past [`MAX_DEPTH`] are dropped.
fn split_levels(raw: &str, delimiter: char) -> [Option<String>; MAX_DEPTH] {
    let mut levels: [Option<String>; MAX_DEPTH] = Default::default();
    if raw.is_empty() {
        return levels;
    }
    for (slot, segment) in levels.iter_mut().zip(raw.split(delimiter)) {
        if !segment.is_empty() {
            *slot = Some(segment.to_string());
        }
    }
    levels
}

/// The full, read-only collection of rows loaded for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyTable {
    headers: Vec<String>,
    path_column: usize,
    rows: Vec<HierarchyRow>,
}

impl HierarchyTable {
    /// Build a table from a header row and raw records.
    ///
    /// Records shorter than the header are padded with empty cells.
    pub fn from_records(
        headers: Vec<String>,
        records: Vec<Vec<String>>,
        options: &HierarchyOptions,
    ) -> Result<Self> {
        let path_column = headers
            .iter()
            .position(|h| h == &options.path_column)
            .ok_or_else(|| Error::MissingColumn(options.path_column.clone()))?;

        let width = headers.len();
        let rows = records
            .into_iter()
            .map(|mut cells| {
                if cells.len() < width {
                    cells.resize(width, String::new());
                }
                HierarchyRow::new(cells, path_column, options.delimiter)
            })
            .collect();

        Ok(Self {
            headers,
            path_column,
            rows,
        })
    }

    /// Column headers of the source table
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the path column among the headers
    pub fn path_column(&self) -> usize {
        self.path_column
    }

    /// All rows, in source order
    pub fn rows(&self) -> &[HierarchyRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct level-1 labels, sorted ascending
    pub fn roots(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|r| r.level(0))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
