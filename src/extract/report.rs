use std::fmt;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::ExtractError;

/// An item that could not be extracted.
#[derive(Debug)]
pub struct ItemFailure {
    /// Sprite name, array element name or texture path
    pub item: String,
    pub error: ExtractError,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.error)
    }
}

/// Outcome of one or more extraction jobs.
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Written files in the order they were written
    pub written: Vec<PathBuf>,
    pub failures: Vec<ItemFailure>,
}

impl ExtractReport {
    pub fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn record_failure(&mut self, item: impl Into<String>, error: ExtractError) {
        let failure = ItemFailure {
            item: item.into(),
            error,
        };
        warn!("Skipped {}", failure);
        self.failures.push(failure);
    }

    pub fn merge(&mut self, other: ExtractReport) {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
    }

    /// The most recently written file, if any.
    pub fn last_written(&self) -> Option<&Path> {
        self.written.last().map(PathBuf::as_path)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order() {
        let mut a = ExtractReport::default();
        a.record_written(PathBuf::from("a.png"));
        let mut b = ExtractReport::default();
        b.record_written(PathBuf::from("b.png"));
        b.record_failure("c", ExtractError::FormatUnresolved);

        a.merge(b);
        assert_eq!(a.written.len(), 2);
        assert_eq!(a.last_written(), Some(Path::new("b.png")));
        assert!(!a.is_success());
        assert_eq!(a.failures[0].item, "c");
    }

    #[test]
    fn test_empty_report() {
        let report = ExtractReport::default();
        assert!(report.is_success());
        assert_eq!(report.last_written(), None);
    }
}
