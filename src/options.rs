//! Options for cleaning, classification and filtering.

use crate::error::{Error, Result};

/// Columns removed from every export by default.
pub const DEFAULT_DROP_COLUMNS: &[&str] = &["profileUrl", "avatarUrl", "isVerified", "followedByYou"];

/// Column renames, applied in this order.
pub const DEFAULT_RENAMES: &[(&str, &str)] = &[
    ("userName", "user_name"),
    ("fullName", "full_name"),
    ("login", "user_name"),
    ("name", "full_name"),
];

/// Options for controlling CSV cleaning behavior.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// How to handle rows with more fields than the header.
    pub error_mode: ErrorMode,

    /// How a footer candidate is confirmed.
    pub footer_confirmation: FooterConfirmation,

    /// Number of rows inspected when confirming a footer candidate.
    pub footer_window: usize,

    /// Columns dropped when present.
    pub drop_columns: Vec<String>,

    /// Column renames `(from, to)`, applied in order.
    pub renames: Vec<(String, String)>,

    /// Whether to sanitize `user_name`/`full_name` values (`"0"`, `"nan"`).
    pub sanitize_names: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            footer_confirmation: FooterConfirmation::Inclusive,
            footer_window: 5,
            drop_columns: DEFAULT_DROP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            renames: DEFAULT_RENAMES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            sanitize_names: true,
        }
    }
}

impl CleanOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that only strip footers and junk rows, keeping every column as-is.
    ///
    /// `user_name`/`full_name` are still created when absent, because the
    /// filter stage reads them.
    pub fn minimal() -> Self {
        Self {
            drop_columns: Vec::new(),
            renames: Vec::new(),
            sanitize_names: false,
            ..Self::default()
        }
    }

    /// Sets strict error handling (fail on over-long rows).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Sets lenient error handling (truncate over-long rows).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Confirms footer candidates only from the rows that follow them.
    pub fn with_lookahead(mut self) -> Self {
        self.footer_confirmation = FooterConfirmation::Lookahead;
        self
    }

    /// Sets the footer confirmation window length.
    pub fn with_footer_window(mut self, rows: usize) -> Self {
        self.footer_window = rows;
        self
    }

    /// Adds a column to the drop list.
    pub fn drop_column(mut self, name: impl Into<String>) -> Self {
        self.drop_columns.push(name.into());
        self
    }

    /// Appends a rename, applied after the existing ones.
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push((from.into(), to.into()));
        self
    }

    /// Returns true if over-long rows should be truncated instead of rejected.
    pub fn is_lenient(&self) -> bool {
        matches!(self.error_mode, ErrorMode::Lenient)
    }

    /// Checks that the options can be used for a run.
    pub fn validate(&self) -> Result<()> {
        if self.footer_window == 0 {
            return Err(Error::InvalidOptions(
                "footer_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// How to handle rows whose field count exceeds the header.
///
/// Short rows are always padded with missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Reject the whole file.
    Strict,
    /// Truncate the row to the header width and continue.
    #[default]
    Lenient,
}

/// Where the footer confirmation window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterConfirmation {
    /// The window includes the candidate row itself.
    #[default]
    Inclusive,
    /// The window starts at the row after the candidate.
    Lookahead,
}

/// Options for the name classifier.
#[derive(Debug, Clone, Default)]
pub struct ClassifierOptions {
    /// NFKC-fold text before the stylized-letter table is applied.
    pub fold_compatibility: bool,
}

impl ClassifierOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables compatibility folding of mathematical and fullwidth letters.
    pub fn with_compatibility_folding(mut self) -> Self {
        self.fold_compatibility = true;
        self
    }
}

/// Options for the filter pipeline.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Cleaning stage options.
    pub clean: CleanOptions,

    /// Whether to classify rows in parallel.
    pub parallel: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            clean: CleanOptions::default(),
            parallel: true,
        }
    }
}

impl FilterOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cleaning options.
    pub fn with_clean_options(mut self, clean: CleanOptions) -> Self {
        self.clean = clean;
        self
    }

    /// Disables parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Checks that the options can be used for a run.
    pub fn validate(&self) -> Result<()> {
        self.clean.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clean_options() {
        let options = CleanOptions::default();
        assert!(options.is_lenient());
        assert_eq!(options.footer_window, 5);
        assert_eq!(options.footer_confirmation, FooterConfirmation::Inclusive);
        assert_eq!(options.drop_columns.len(), 4);
        assert_eq!(options.renames[0], ("userName".to_string(), "user_name".to_string()));
        assert_eq!(options.renames[3], ("name".to_string(), "full_name".to_string()));
    }

    #[test]
    fn test_minimal_keeps_columns() {
        let options = CleanOptions::minimal();
        assert!(options.drop_columns.is_empty());
        assert!(options.renames.is_empty());
        assert!(!options.sanitize_names);
    }

    #[test]
    fn test_builder_chain() {
        let options = CleanOptions::new()
            .strict()
            .with_lookahead()
            .with_footer_window(3)
            .drop_column("bio")
            .rename("handle", "user_name");

        assert!(!options.is_lenient());
        assert_eq!(options.footer_confirmation, FooterConfirmation::Lookahead);
        assert_eq!(options.footer_window, 3);
        assert!(options.drop_columns.iter().any(|c| c == "bio"));
        assert_eq!(
            options.renames.last(),
            Some(&("handle".to_string(), "user_name".to_string()))
        );
    }

    #[test]
    fn test_zero_window_rejected() {
        let options = CleanOptions::default().with_footer_window(0);
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));

        let filter = FilterOptions::new().with_clean_options(options);
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_filter_options_sequential() {
        let options = FilterOptions::new();
        assert!(options.parallel);
        assert!(!options.sequential().parallel);
    }
}
