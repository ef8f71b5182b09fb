//! # Name Classifier
//!
//! Decides whether a profile looks like a female or business account from
//! its username and full name.
//!
//! ## Rules (first match wins)
//!
//! 1. **Empty input** - nothing to judge, keep
//! 2. **Business keyword** - any token is a business keyword, remove
//! 3. **Male exception** - any token is a known male name, keep
//! 4. **Female name** - any token is a known female name, remove
//! 5. **Female ending** - any token longer than 3 characters (and not a
//!    male exception) ends with a female suffix, remove
//! 6. Otherwise keep

use crate::normalize::{normalize, normalize_compat};
use crate::options::ClassifierOptions;
use crate::wordlist::{WordLists, WordSet};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Female name endings, used as the last resort.
pub const FEMALE_ENDINGS: &[&str] = &[
    "a", "ya", "ia", "ina", "ova", "eva", "skaya", "ivna", "yivna", "ovna",
];

/// Tokens of at most this many characters skip the ending check.
const MIN_ENDING_TOKEN_LEN: usize = 3;

// Anything that is not a Latin or Russian/Ukrainian Cyrillic letter
static RE_NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zа-яёїієґ]+").unwrap());

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Female or business account: remove from output.
    Female,
    /// Keep the profile.
    Keep,
}

impl Verdict {
    /// Returns true if the profile should be removed.
    pub fn is_removed(self) -> bool {
        matches!(self, Verdict::Female)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Female => write!(f, "female"),
            Verdict::Keep => write!(f, "keep"),
        }
    }
}

/// The rule that produced a verdict.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Reason {
    /// Username and full name were both blank.
    Empty,
    /// A token is a business keyword.
    BusinessKeyword { token: String },
    /// A token is a male exception name.
    MaleException { token: String },
    /// A token is a female name.
    FemaleName { token: String },
    /// A token ends with a female suffix.
    FemaleEnding { token: String, suffix: &'static str },
    /// No rule matched.
    NoMatch,
}

impl Reason {
    /// Returns the verdict this reason leads to.
    pub fn verdict(&self) -> Verdict {
        match self {
            Reason::BusinessKeyword { .. }
            | Reason::FemaleName { .. }
            | Reason::FemaleEnding { .. } => Verdict::Female,
            Reason::Empty | Reason::MaleException { .. } | Reason::NoMatch => Verdict::Keep,
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Empty => write!(f, "empty name"),
            Reason::BusinessKeyword { token } => write!(f, "business keyword '{}'", token),
            Reason::MaleException { token } => write!(f, "male name '{}'", token),
            Reason::FemaleName { token } => write!(f, "female name '{}'", token),
            Reason::FemaleEnding { token, suffix } => {
                write!(f, "'{}' ends with '-{}'", token, suffix)
            }
            Reason::NoMatch => write!(f, "no rule matched"),
        }
    }
}

/// Priority-ordered name classifier over injected word lists.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    lists: WordLists,
    options: ClassifierOptions,
}

impl Classifier {
    /// Creates a classifier from word lists and options.
    pub fn new(lists: WordLists, options: ClassifierOptions) -> Self {
        Self { lists, options }
    }

    /// Creates a classifier with default options.
    pub fn with_lists(lists: WordLists) -> Self {
        Self::new(lists, ClassifierOptions::default())
    }

    /// Returns the word lists in use.
    pub fn lists(&self) -> &WordLists {
        &self.lists
    }

    /// Returns the options in use.
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classifies a profile.
    pub fn classify(&self, username: &str, fullname: &str) -> Verdict {
        self.explain(username, fullname).verdict()
    }

    /// Classifies a profile and reports which rule decided it.
    pub fn explain(&self, username: &str, fullname: &str) -> Reason {
        let combined = format!("{} {}", username, fullname);
        if combined.trim().is_empty() {
            return Reason::Empty;
        }

        // Folding runs before lowercasing: math capitals only gain a
        // lowercase form once folded to ASCII
        let normalized = if self.options.fold_compatibility {
            normalize_compat(&combined).to_lowercase()
        } else {
            normalize(&combined.to_lowercase())
        };

        let tokens = tokenize(&normalized);

        if let Some(token) = first_match(&tokens, &self.lists.female_business) {
            return Reason::BusinessKeyword { token };
        }

        if let Some(token) = first_match(&tokens, &self.lists.male_exceptions) {
            return Reason::MaleException { token };
        }

        if let Some(token) = first_match(&tokens, &self.lists.female_names) {
            return Reason::FemaleName { token };
        }

        for token in &tokens {
            if token.chars().count() <= MIN_ENDING_TOKEN_LEN
                || self.lists.male_exceptions.contains(token)
            {
                continue;
            }
            if let Some(&suffix) = FEMALE_ENDINGS.iter().find(|s| token.ends_with(*s)) {
                return Reason::FemaleEnding {
                    token: token.clone(),
                    suffix,
                };
            }
        }

        Reason::NoMatch
    }
}

fn first_match(tokens: &BTreeSet<String>, set: &WordSet) -> Option<String> {
    tokens.iter().find(|t| set.contains(t)).cloned()
}

/// Splits lowercased, normalized text into distinct letter-only tokens.
///
/// The set is ordered so that explanations are reproducible; verdicts do not
/// depend on the order.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    RE_NON_LETTERS
        .replace_all(text, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
