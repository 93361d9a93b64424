//! # orgdrill-csv
//!
//! Loads a [`HierarchyTable`](orgdrill_core::HierarchyTable) from CSV and
//! writes row sets back out.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
