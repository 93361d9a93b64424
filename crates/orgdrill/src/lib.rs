//! # orgdrill
//!
//! Drill-down navigation over organization hierarchies stored as delimited
//! path strings in a spreadsheet column.
//!
//! ## Example
//!
//! ```rust,no_run
//! use orgdrill::prelude::*;
//!
//! let table = HierarchyTable::open("Disney_HR.xlsx", &LoadOptions::default()).unwrap();
//! let nav = Navigator::new(&table);
//!
//! let mut path = ActivePath::new();
//! nav.select_root(&mut path, "DIS").unwrap();
//! for child in nav.compute_children(&path) {
//!     println!("{}", child);
//! }
//! ```

pub mod prelude;

pub use orgdrill_core::{
    ActivePath, ButtonRole, CellRef, Error, HierarchyOptions, HierarchyRow, HierarchyTable,
    NavAction, NavButton, NavView, Navigator, NodeView, Result, DEFAULT_DELIMITER,
    DEFAULT_PATH_COLUMN, MAX_DEPTH,
};

pub use orgdrill_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};
pub use orgdrill_xlsx::{XlsxError, XlsxReadOptions, XlsxReader};

use std::path::Path;

/// How a table file is located, parsed, and split into levels
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub hierarchy: HierarchyOptions,
    pub csv: CsvReadOptions,
    pub xlsx: XlsxReadOptions,
}

/// Extension trait for HierarchyTable to add file I/O
pub trait HierarchyTableExt: Sized {
    /// Open a table from a file, choosing the format by extension
    fn open<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self>;

    /// Write a subset of rows, with this table's headers, to a CSV or TSV file
    fn export_rows<P: AsRef<Path>>(&self, rows: &[&HierarchyRow], path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

impl HierarchyTableExt for HierarchyTable {
    fn open<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<HierarchyTable> {
        let path = path.as_ref();

        match extension(path).as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxReader::read_table_file(path, &options.xlsx, &options.hierarchy)
                    .map_err(|e| match e {
                        XlsxError::Core(core) => core,
                        other => Error::other(other.to_string()),
                    })
            }
            Some("csv") => CsvReader::read_table_file(path, &options.csv, &options.hierarchy)
                .map_err(|e| match e {
                    CsvError::Core(core) => core,
                    other => Error::other(other.to_string()),
                }),
            Some("tsv") => {
                let csv = options.csv.clone().tab_separated();
                CsvReader::read_table_file(path, &csv, &options.hierarchy).map_err(|e| match e {
                    CsvError::Core(core) => core,
                    other => Error::other(other.to_string()),
                })
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }

    fn export_rows<P: AsRef<Path>>(&self, rows: &[&HierarchyRow], path: P) -> Result<()> {
        let path = path.as_ref();
        let options = match extension(path).as_deref() {
            Some("csv") => CsvWriteOptions::default(),
            Some("tsv") => CsvWriteOptions::default().tab_separated(),
            _ => {
                return Err(Error::other(format!(
                    "Unsupported export format: {}",
                    path.display()
                )))
            }
        };

        CsvWriter::write_rows_file(self.headers(), rows, path, &options)
            .map_err(|e| Error::other(e.to_string()))
    }
}
