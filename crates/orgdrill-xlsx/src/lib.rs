//! # orgdrill-xlsx
//!
//! Loads a [`HierarchyTable`](orgdrill_core::HierarchyTable) from one sheet of
//! an XLSX workbook.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::{XlsxReadOptions, XlsxReader};
