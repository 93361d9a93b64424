//! The active drill-down path of one session

use std::fmt;

use crate::MAX_DEPTH;

/// The ordered chain of labels selected in one session.
///
/// Only [`Navigator`](crate::Navigator) operations move a path, so every
/// path built through them is a prefix reachable in the table it was
/// navigated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActivePath {
    labels: Vec<String>,
}

impl ActivePath {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a path from saved labels without checking it against any table.
    ///
    /// Labels past [`MAX_DEPTH`] are dropped. A restored path that no longer
    /// matches the data yields empty children and exact matches.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().take(MAX_DEPTH).map(Into::into).collect(),
        }
    }

    /// Selected labels, root first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of selected levels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the path has reached [`MAX_DEPTH`]
    pub fn is_full(&self) -> bool {
        self.labels.len() >= MAX_DEPTH
    }

    /// The deepest selected label
    pub fn current(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Join the labels with a delimiter, e.g. `DIS/MMF`
    pub fn join(&self, delimiter: char) -> String {
        let mut buf = [0u8; 4];
        let sep: &str = delimiter.encode_utf8(&mut buf);
        self.labels.join(sep)
    }

    pub(crate) fn set_root(&mut self, label: &str) {
        self.labels.clear();
        self.labels.push(label.to_string());
    }

    pub(crate) fn push(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.labels.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.labels.clear();
    }
}

impl fmt::Display for ActivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join(" > "))
    }
}
