//! # deckclean
//!
//! Cleans social-media profile exports and removes profiles that look like
//! female or business accounts, judged only by username and display name.
//!
//! ## Pipeline
//!
//! - **Clean**: detect the delimiter, cut the vendor footer, drop junk rows
//!   and noise columns, normalize the name columns
//! - **Classify**: keyword, word-list and suffix rules over normalized tokens
//! - **Write**: surviving rows, same delimiter, same column order
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> deckclean::Result<()> {
//!     let stats = deckclean::filter_file("export.csv", "filtered_export.csv")?;
//!     println!("removed {} of {}", stats.removed, stats.total_processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `async`: non-blocking wrappers with Tokio
//! - `cp1251`: decode non-UTF-8 input as Windows-1251

pub mod classifier;
pub mod cleaner;
pub mod detect;
pub mod error;
pub mod footer;
pub mod model;
pub mod normalize;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod wordlist;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use classifier::{Classifier, Reason, Verdict};
pub use cleaner::{default_cleaned_path, Cleaned, Cleaner, FULL_NAME, USER_NAME};
pub use detect::{detect_delimiter_from_bytes, detect_delimiter_from_path, Delimiter};
pub use error::{Error, Result};
pub use model::{Cell, CleanReport, FilterStats, Tabular};
pub use options::{ClassifierOptions, CleanOptions, ErrorMode, FilterOptions, FooterConfirmation};
pub use pipeline::{default_output_path, FilterOutcome, Pipeline};
pub use wordlist::{WordLists, WordSet};

use std::path::{Path, PathBuf};

/// Filters a profile export with the bundled word lists and default options.
///
/// # Example
///
/// ```no_run
/// let stats = deckclean::filter_file("export.csv", "out.csv")?;
/// assert_eq!(stats.remaining, stats.total_processed - stats.removed);
/// # Ok::<(), deckclean::Error>(())
/// ```
pub fn filter_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<FilterStats> {
    let outcome = Deckclean::new().build().run_to(input, output)?;
    Ok(outcome.stats)
}

/// Runs only the cleaning stage on a file with default options.
///
/// # Example
///
/// ```no_run
/// let cleaned = deckclean::clean_file("export.csv")?;
/// println!("{} rows after cleaning", cleaned.table.row_count());
/// # Ok::<(), deckclean::Error>(())
/// ```
pub fn clean_file(input: impl AsRef<Path>) -> Result<Cleaned> {
    Cleaner::default().clean_file(input)
}

/// Builder for a configured [`Pipeline`].
///
/// # Example
///
/// ```no_run
/// use deckclean::Deckclean;
///
/// let outcome = Deckclean::new()
///     .with_wordlist_dir("./lists")
///     .strict()
///     .sequential()
///     .build()
///     .run("export.csv")?;
/// println!("{}", outcome.output.display());
/// # Ok::<(), deckclean::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Deckclean {
    wordlist_dir: Option<PathBuf>,
    lists: Option<WordLists>,
    classifier_options: ClassifierOptions,
    filter_options: FilterOptions,
}

impl Deckclean {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads word lists from a directory instead of the bundled ones.
    pub fn with_wordlist_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.wordlist_dir = Some(dir.into());
        self
    }

    /// Returns the configured word list directory, if any.
    pub fn wordlist_dir(&self) -> Option<&Path> {
        self.wordlist_dir.as_deref()
    }

    /// Uses already loaded word lists.
    pub fn with_wordlists(mut self, lists: WordLists) -> Self {
        self.lists = Some(lists);
        self
    }

    /// Replaces the cleaning options.
    pub fn with_clean_options(mut self, options: CleanOptions) -> Self {
        self.filter_options.clean = options;
        self
    }

    /// Fails on rows with more fields than the header.
    pub fn strict(mut self) -> Self {
        self.filter_options.clean = self.filter_options.clean.strict();
        self
    }

    /// Requires footer confirmation from the rows after a candidate.
    pub fn lookahead(mut self) -> Self {
        self.filter_options.clean = self.filter_options.clean.with_lookahead();
        self
    }

    /// Folds mathematical and fullwidth letters before classification.
    pub fn fold_fonts(mut self) -> Self {
        self.classifier_options = self.classifier_options.with_compatibility_folding();
        self
    }

    /// Disables parallel processing.
    pub fn sequential(mut self) -> Self {
        self.filter_options = self.filter_options.sequential();
        self
    }

    /// Builds the classifier, loading word lists as configured.
    pub fn classifier(&self) -> Classifier {
        let lists = match (&self.lists, &self.wordlist_dir) {
            (Some(lists), _) => lists.clone(),
            (None, Some(dir)) => WordLists::load_from_dir(dir),
            (None, None) => WordLists::load_default(),
        };
        Classifier::new(lists, self.classifier_options.clone())
    }

    /// Builds the pipeline.
    pub fn build(self) -> Pipeline {
        let classifier = self.classifier();
        Pipeline::new(classifier, self.filter_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builder_options() {
        let pipeline = Deckclean::new()
            .with_wordlists(WordLists::default())
            .strict()
            .lookahead()
            .fold_fonts()
            .sequential()
            .build();

        let options = pipeline.options();
        assert_eq!(options.clean.error_mode, ErrorMode::Strict);
        assert_eq!(options.clean.footer_confirmation, FooterConfirmation::Lookahead);
        assert!(!options.parallel);
        assert!(pipeline.classifier().options().fold_compatibility);
        assert!(pipeline.classifier().lists().is_empty());
    }

    #[test]
    fn test_builder_wordlist_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(wordlist::RUSSIAN_FEMALE_FILE), "# names\nАнна\n").unwrap();

        let classifier = Deckclean::new().with_wordlist_dir(dir.path()).classifier();
        assert_eq!(classifier.classify("", "Анна"), Verdict::Female);
        assert!(classifier.lists().male_exceptions.is_empty());
    }

    #[test]
    fn test_filter_file_with_bundled_lists() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "userName,fullName\nanna_k,Anna Kowalska\njohn_d,John Doe\n").unwrap();

        let stats = filter_file(&input, &output).unwrap();
        assert_eq!(
            stats,
            FilterStats {
                total_processed: 2,
                removed: 1,
                remaining: 1
            }
        );
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("john_d,John Doe"));
        assert!(!written.contains("anna_k"));
    }

    #[test]
    fn test_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(&input, "login;name\nanna_k;Anna\nFound profiles count: 1\n").unwrap();

        let cleaned = clean_file(&input).unwrap();
        assert_eq!(cleaned.delimiter, Delimiter::Semicolon);
        assert_eq!(cleaned.table.headers(), &[USER_NAME, FULL_NAME]);
        assert_eq!(cleaned.table.row_count(), 1);
    }
}
