//! Prelude module - common imports for orgdrill users
//!
//! ```rust
//! use orgdrill::prelude::*;
//! ```

pub use crate::{
    ActivePath,
    // Render model
    ButtonRole,
    // Error types
    Error,
    HierarchyOptions,
    HierarchyRow,
    // Main types
    HierarchyTable,
    // Extension traits
    HierarchyTableExt,
    LoadOptions,
    NavAction,
    NavButton,
    NavView,
    Navigator,
    Result,
};
