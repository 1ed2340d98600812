// Author: kelexine (https://github.com/kelexine)
// models.rs — Core data structures for the line counter

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Files above this many lines are listed as refactoring candidates.
pub const REFACTOR_THRESHOLD: usize = 500;

/// Coarse size bucket shown next to each file in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeClass {
    Tiny,
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn of(lines: usize) -> Self {
        match lines {
            0..100 => Self::Tiny,
            100..=500 => Self::Small,
            501..=1000 => Self::Medium,
            _ => Self::Large,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tiny => "Tiny",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One counted file: its path relative to the scan root and its line count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLines {
    pub path: String,
    pub lines: usize,
}

impl FileLines {
    pub fn new(path: impl Into<String>, lines: usize) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    #[inline]
    pub fn size_class(&self) -> SizeClass {
        SizeClass::of(self.lines)
    }

    #[inline]
    pub fn is_refactor_candidate(&self) -> bool {
        self.lines > REFACTOR_THRESHOLD
    }
}

/// The full scan result returned from the counter.
#[derive(Debug)]
pub struct ScanResult {
    pub root: PathBuf,
    /// Counted files, largest first, ties broken by path.
    pub files: Vec<FileLines>,
    /// Code files the scanner produced, counted or not.
    pub matched: usize,
    /// Code files whose lines could not be counted.
    pub skipped: usize,
}

impl ScanResult {
    pub fn new(root: PathBuf, mut files: Vec<FileLines>, matched: usize) -> Self {
        sort_rows(&mut files);
        let skipped = matched.saturating_sub(files.len());
        Self {
            root,
            files,
            matched,
            skipped,
        }
    }

    #[inline]
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    /// Split rows on `min` lines: (rows shown, number hidden).
    pub fn filter_min(&self, min: usize) -> (Vec<&FileLines>, usize) {
        let shown: Vec<&FileLines> = self.files.iter().filter(|f| f.lines >= min).collect();
        let hidden = self.files.len() - shown.len();
        (shown, hidden)
    }
}

/// Largest first; equal counts ordered by path so output never depends on
/// the order in which files finished counting.
pub fn sort_rows(rows: &mut [FileLines]) {
    rows.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path)));
}

/// Aggregates over the rows shown in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub total_files: usize,
    pub total_lines: usize,
    pub average_lines: usize,
    pub largest: Option<&'a FileLines>,
}

impl<'a> Summary<'a> {
    /// `rows` must already be sorted largest first.
    pub fn of(rows: &[&'a FileLines]) -> Self {
        let total_files = rows.len();
        let total_lines = rows.iter().map(|f| f.lines).sum();
        let average_lines = if total_files == 0 { 0 } else { total_lines / total_files };
        Self {
            total_files,
            total_lines,
            average_lines,
            largest: rows.first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_boundaries() {
        assert_eq!(SizeClass::of(0), SizeClass::Tiny);
        assert_eq!(SizeClass::of(99), SizeClass::Tiny);
        assert_eq!(SizeClass::of(100), SizeClass::Small);
        assert_eq!(SizeClass::of(500), SizeClass::Small);
        assert_eq!(SizeClass::of(501), SizeClass::Medium);
        assert_eq!(SizeClass::of(1000), SizeClass::Medium);
        assert_eq!(SizeClass::of(1001), SizeClass::Large);
    }

    #[test]
    fn test_scan_result_sorted_and_skipped() {
        let result = ScanResult::new(
            PathBuf::from("/repo"),
            vec![
                FileLines::new("b.rs", 10),
                FileLines::new("c.rs", 600),
                FileLines::new("a.rs", 10),
            ],
            5,
        );
        let order: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(order, ["c.rs", "a.rs", "b.rs"]);
        assert_eq!(result.processed(), 3);
        assert_eq!(result.skipped, 2);
    }

    #[test]
    fn test_filter_min_partitions_rows() {
        let result = ScanResult::new(
            PathBuf::from("/repo"),
            vec![
                FileLines::new("a.py", 10),
                FileLines::new("b.js", 600),
                FileLines::new("README.md", 20),
                FileLines::new("c.go", 100),
            ],
            4,
        );
        let (shown, hidden) = result.filter_min(100);
        let names: Vec<_> = shown.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(names, ["b.js", "c.go"]);
        assert_eq!(shown.len() + hidden, result.processed());

        let (shown, hidden) = result.filter_min(0);
        assert_eq!(shown.len(), 4);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_summary() {
        let rows = [
            FileLines::new("b.js", 600),
            FileLines::new("README.md", 20),
            FileLines::new("a.py", 10),
        ];
        let refs: Vec<&FileLines> = rows.iter().collect();
        let summary = Summary::of(&refs);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.total_lines, 630);
        assert_eq!(summary.average_lines, 210);
        assert_eq!(summary.largest.map(|f| f.path.as_str()), Some("b.js"));
        assert!(rows[0].is_refactor_candidate());
        assert!(!rows[1].is_refactor_candidate());
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::of(&[]);
        assert_eq!(summary.total_lines, 0);
        assert_eq!(summary.average_lines, 0);
        assert!(summary.largest.is_none());
    }
}
