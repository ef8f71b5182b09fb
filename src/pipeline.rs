//! The filter pipeline: clean, classify, write.

use crate::classifier::{Classifier, Verdict};
use crate::cleaner::{Cleaner, FULL_NAME, USER_NAME};
use crate::error::Result;
use crate::model::{Cell, CleanReport, FilterStats, Tabular};
use crate::options::FilterOptions;
use crate::output::write_table_to_path;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of filtering one file.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Where the filtered table was written
    pub output: PathBuf,
    /// Classification counts
    pub stats: FilterStats,
    /// What the cleaning stage changed
    pub report: CleanReport,
}

/// Cleans an export and removes female/business profiles from it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    classifier: Classifier,
    cleaner: Cleaner,
    options: FilterOptions,
}

impl Pipeline {
    /// Creates a pipeline.
    pub fn new(classifier: Classifier, options: FilterOptions) -> Self {
        Self {
            classifier,
            cleaner: Cleaner::new(options.clean.clone()),
            options,
        }
    }

    /// Returns the classifier in use.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Returns the options in use.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Filters `input` into `filtered_<name>` next to it.
    pub fn run(&self, input: impl AsRef<Path>) -> Result<FilterOutcome> {
        let input = input.as_ref();
        self.run_to(input, default_output_path(input))
    }

    /// Filters `input` into `output`.
    ///
    /// Nothing is written when cleaning fails.
    pub fn run_to(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<FilterOutcome> {
        let input = input.as_ref();
        let output = output.as_ref();
        self.options.validate()?;

        let cleaned = self.cleaner.clean_file(input)?;
        let (filtered, stats) = self.filter_table(&cleaned.table);
        write_table_to_path(&filtered, cleaned.delimiter, output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            total = stats.total_processed,
            removed = stats.removed,
            remaining = stats.remaining,
            "filtering complete"
        );

        Ok(FilterOutcome {
            output: output.to_path_buf(),
            stats,
            report: cleaned.report,
        })
    }

    /// Classifies every row of a cleaned table and keeps the non-female ones.
    ///
    /// Row order is preserved.
    pub fn filter_table(&self, table: &Tabular) -> (Tabular, FilterStats) {
        let columns = (table.column_index(USER_NAME), table.column_index(FULL_NAME));

        let verdicts: Vec<Verdict> = if self.options.parallel {
            table
                .rows()
                .par_iter()
                .map(|row| self.classify_row(row, columns))
                .collect()
        } else {
            table
                .rows()
                .iter()
                .map(|row| self.classify_row(row, columns))
                .collect()
        };

        let mut stats = FilterStats::new();
        let mut kept = Vec::with_capacity(table.row_count());

        for (row, verdict) in table.rows().iter().zip(verdicts) {
            stats.record(verdict);
            if verdict.is_removed() {
                debug!(
                    user_name = field(row, columns.0),
                    full_name = field(row, columns.1),
                    "removed female/business profile"
                );
            } else {
                kept.push(row.clone());
            }
        }

        (table.with_rows(kept), stats)
    }

    /// Filters several files, each into its default output path.
    ///
    /// Returns one result per input, in input order.
    pub fn run_batch<P>(&self, inputs: &[P]) -> Vec<Result<FilterOutcome>>
    where
        P: AsRef<Path> + Sync,
    {
        if self.options.parallel {
            inputs.par_iter().map(|input| self.run(input)).collect()
        } else {
            inputs.iter().map(|input| self.run(input)).collect()
        }
    }

    fn classify_row(&self, row: &[Cell], columns: (Option<usize>, Option<usize>)) -> Verdict {
        self.classifier
            .classify(field(row, columns.0), field(row, columns.1))
    }
}

fn field(row: &[Cell], column: Option<usize>) -> &str {
    column
        .and_then(|col| row.get(col))
        .map(Cell::as_str)
        .unwrap_or("")
}

/// Returns the default output path for a filtered file: `filtered_<name>`
/// in the input's directory.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input.csv".to_string());
    input.with_file_name(format!("filtered_{}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::options::CleanOptions;
    use crate::wordlist::WordLists;
    use std::fs;

    fn classifier() -> Classifier {
        Classifier::with_lists(
            WordLists::builder()
                .male_exceptions(["nikita", "sasha"])
                .female_business(["beauty", "salon", "nails"])
                .female_names(["anna", "olena", "maria"])
                .build(),
        )
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(classifier(), FilterOptions::default())
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(&input, "userName,fullName\nanna_k,\njohn_d,John Doe\n").unwrap();

        let outcome = pipeline().run(&input).unwrap();

        assert_eq!(outcome.output, dir.path().join("filtered_export.csv"));
        assert_eq!(
            outcome.stats,
            FilterStats {
                total_processed: 2,
                removed: 1,
                remaining: 1
            }
        );

        let written = fs::read_to_string(&outcome.output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["user_name,full_name", "john_d,John Doe"]);
    }

    #[test]
    fn test_named_female_profile_removed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "userName,fullName\nanna_k,Anna Kowalska\njohn_d,John Doe\n").unwrap();

        let outcome = pipeline().run_to(&input, &output).unwrap();

        assert_eq!(
            outcome.stats,
            FilterStats {
                total_processed: 2,
                removed: 1,
                remaining: 1
            }
        );
        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["user_name,full_name", "john_d,John Doe"]);
    }

    #[test]
    fn test_semicolon_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "userName;fullName;bio\nmaria.nails;Maria;x\nnikita_v;Никита;y\n").unwrap();

        let outcome = pipeline().run_to(&input, &output).unwrap();
        assert_eq!(outcome.stats.removed, 1);

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["user_name;full_name;bio", "nikita_v;Никита;y"]);
    }

    #[test]
    fn test_all_removed_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(&input, "userName,fullName\nanna_k,Anna\nolena.beauty,Olena\n").unwrap();

        let outcome = pipeline().run(&input).unwrap();
        assert_eq!(outcome.stats.remaining, 0);

        let written = fs::read_to_string(&outcome.output).unwrap();
        assert_eq!(written.trim_end(), "user_name,full_name");
    }

    #[test]
    fn test_footer_removed_before_classification() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(
            &input,
            concat!(
                "userName,fullName,profileUrl\n",
                "john_d,John Doe,x\n",
                "oleg,Oleg,y\n",
                "Found profiles count: 2\n",
                "IG DM BOT:\n",
                "https://socialdeck.ai\n",
            ),
        )
        .unwrap();

        let outcome = pipeline().run(&input).unwrap();
        assert_eq!(outcome.stats.total_processed, 2);
        assert_eq!(outcome.stats.remaining, 2);
        assert_eq!(outcome.report.footer_rows, 3);
    }

    #[test]
    fn test_unreadable_header_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "").unwrap();

        let result = pipeline().run_to(&input, &output);
        assert!(matches!(result, Err(Error::UnreadableHeader)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = pipeline().run(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(Error::NoInputFile(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut table = Tabular::new([USER_NAME, FULL_NAME]);
        for i in 0..200 {
            let user = if i % 3 == 0 { format!("anna{}", i) } else { format!("user{}", i) };
            table.push_fields([user.as_str(), ""]);
        }

        let parallel = pipeline().filter_table(&table);
        let sequential =
            Pipeline::new(classifier(), FilterOptions::default().sequential()).filter_table(&table);

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.1.removed, 67);
    }

    #[test]
    fn test_filter_table_without_name_columns() {
        let mut table = Tabular::new(["id"]);
        table.push_fields(["1"]);

        let (kept, stats) = pipeline().filter_table(&table);
        assert_eq!(kept.row_count(), 1);
        assert_eq!(stats.remaining, 1);
    }

    #[test]
    fn test_run_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.csv");
        fs::write(&good, "userName,fullName\njohn_d,John\n").unwrap();
        let missing = dir.path().join("b.csv");

        let results = pipeline().run_batch(&[good, missing]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().stats.remaining, 1);
        assert!(results[1].is_err());
        assert!(dir.path().join("filtered_a.csv").exists());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = FilterOptions::default()
            .with_clean_options(CleanOptions::default().with_footer_window(0));
        let pipeline = Pipeline::new(classifier(), options);

        let result = pipeline.run("/nonexistent/export.csv");
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("/data/export.csv"),
            PathBuf::from("/data/filtered_export.csv")
        );
        assert_eq!(default_output_path("export.csv"), PathBuf::from("filtered_export.csv"));
    }
}
