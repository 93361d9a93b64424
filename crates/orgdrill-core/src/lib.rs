//! # orgdrill-core
//!
//! Core data structures for the orgdrill hierarchy viewer.
//!
//! This crate provides:
//! - [`HierarchyTable`] and [`HierarchyRow`] - tabular records whose path column
//!   is split into up to [`MAX_DEPTH`] positional levels
//! - [`ActivePath`] - the drill-down position owned by one session
//! - [`Navigator`] - the operations that move an [`ActivePath`] through a table
//!   and compute children and exact matches
//! - [`NavView`] - the render model for one interaction
//!
//! ## Example
//!
//! ```rust
//! use orgdrill_core::{ActivePath, HierarchyOptions, HierarchyTable, Navigator};
//!
//! let table = HierarchyTable::from_records(
//!     vec!["Character_Name".into(), "Org_String_Abbrev".into()],
//!     vec![
//!         vec!["Mickey Mouse".into(), "DIS/MMF/MC".into()],
//!         vec!["Sulley".into(), "DIS/MI/MC".into()],
//!     ],
//!     &HierarchyOptions::default(),
//! )
//! .unwrap();
//!
//! let nav = Navigator::new(&table);
//! let mut path = ActivePath::new();
//! nav.select_root(&mut path, "DIS").unwrap();
//! assert_eq!(nav.compute_children(&path), vec!["MI", "MMF"]);
//! ```

pub mod address;
pub mod error;
pub mod hierarchy;
pub mod navigator;
pub mod path;
pub mod view;

pub use address::CellRef;
pub use error::{Error, Result};
pub use hierarchy::{HierarchyOptions, HierarchyRow, HierarchyTable};
pub use navigator::{NavAction, Navigator, NodeView};
pub use path::ActivePath;
pub use view::{ButtonRole, NavButton, NavView};

/// Number of positional levels a path string is split into
pub const MAX_DEPTH: usize = 5;

/// Default name of the column holding the delimited path
pub const DEFAULT_PATH_COLUMN: &str = "Org_String_Abbrev";

/// Default delimiter between path segments
pub const DEFAULT_DELIMITER: char = '/';
