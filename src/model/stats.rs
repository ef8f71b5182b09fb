//! Run summaries.

use crate::classifier::Verdict;
use crate::detect::Delimiter;
use serde::Serialize;

/// Counts produced by the filter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Rows classified
    pub total_processed: usize,
    /// Rows classified as female/business and left out
    pub removed: usize,
    /// Rows written to the output
    pub remaining: usize,
}

impl FilterStats {
    /// Creates empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classified row.
    pub fn record(&mut self, verdict: Verdict) {
        self.total_processed += 1;
        if verdict.is_removed() {
            self.removed += 1;
        } else {
            self.remaining += 1;
        }
    }

    /// Adds another run's counts.
    pub fn merge(&mut self, other: &FilterStats) {
        self.total_processed += other.total_processed;
        self.removed += other.removed;
        self.remaining += other.remaining;
    }

    /// Serializes the stats to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl FromIterator<Verdict> for FilterStats {
    fn from_iter<I: IntoIterator<Item = Verdict>>(iter: I) -> Self {
        let mut stats = Self::new();
        for verdict in iter {
            stats.record(verdict);
        }
        stats
    }
}

/// What the cleaning stage did to a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Delimiter detected from the first line
    pub delimiter: Delimiter,
    /// Data rows parsed from the file
    pub rows_parsed: usize,
    /// Index of the first footer row, if one was found
    pub footer_start: Option<usize>,
    /// Rows cut off with the footer block
    pub footer_rows: usize,
    /// Rows removed by the footer phrase sweep
    pub swept_rows: usize,
    /// Rows removed because they were empty or had no first value
    pub junk_rows: usize,
    /// Rows truncated to the header width
    pub truncated_rows: usize,
    /// Columns dropped
    pub dropped_columns: Vec<String>,
    /// Columns renamed, as `(from, to)`
    pub renamed_columns: Vec<(String, String)>,
    /// Columns created because they were absent
    pub added_columns: Vec<String>,
    /// Data rows after cleaning
    pub rows_remaining: usize,
}

impl CleanReport {
    /// Total rows removed by cleaning.
    pub fn rows_removed(&self) -> usize {
        self.footer_rows + self.swept_rows + self.junk_rows
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_invariant() {
        let verdicts = [Verdict::Female, Verdict::Keep, Verdict::Keep, Verdict::Female, Verdict::Keep];
        let stats: FilterStats = verdicts.into_iter().collect();

        assert_eq!(stats.total_processed, 5);
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.remaining, stats.total_processed - stats.removed);
    }

    #[test]
    fn test_stats_merge() {
        let mut a: FilterStats = [Verdict::Female].into_iter().collect();
        let b: FilterStats = [Verdict::Keep, Verdict::Keep].into_iter().collect();
        a.merge(&b);
        assert_eq!(
            a,
            FilterStats {
                total_processed: 3,
                removed: 1,
                remaining: 2
            }
        );
    }

    #[test]
    fn test_stats_json() {
        let stats: FilterStats = [Verdict::Female, Verdict::Keep].into_iter().collect();
        assert_eq!(stats.to_json(), r#"{"total_processed":2,"removed":1,"remaining":1}"#);
    }

    #[test]
    fn test_rows_removed() {
        let report = CleanReport {
            footer_rows: 3,
            swept_rows: 1,
            junk_rows: 2,
            ..Default::default()
        };
        assert_eq!(report.rows_removed(), 6);
    }

    #[test]
    fn test_report_json() {
        let report = CleanReport {
            delimiter: Delimiter::Semicolon,
            footer_start: Some(4),
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["delimiter"], ";");
        assert_eq!(value["footer_start"], 4);
        assert!(value["dropped_columns"].as_array().unwrap().is_empty());
    }
}
