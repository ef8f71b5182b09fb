//! Word lists used by the classifier.
//!
//! Each list is a plain-text file with one entry per line. Lines starting
//! with `#` are comments. Missing files are not an error: the classifier
//! keeps working with an empty set, only less accurately.
//!
//! The starter lists under `data/` are compiled into the crate, so
//! [`WordLists::load_default`] needs no files at run time. A directory
//! passed to [`WordLists::load_from_dir`] replaces them.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// File holding male names that override every female signal.
pub const MALE_EXCEPTIONS_FILE: &str = "males_names.txt";

/// File holding keywords that mark brand/business accounts.
pub const FEMALE_BUSINESS_FILE: &str = "female_business_keywords.txt";

/// File holding Ukrainian female names.
pub const UKRAINIAN_FEMALE_FILE: &str = "ukrainian_female_names.txt";

/// File holding Russian female names.
pub const RUSSIAN_FEMALE_FILE: &str = "russian_female_names.txt";

const BUNDLED_MALE_EXCEPTIONS: &str = include_str!("../data/males_names.txt");
const BUNDLED_FEMALE_BUSINESS: &str = include_str!("../data/female_business_keywords.txt");
const BUNDLED_UKRAINIAN_FEMALE: &str = include_str!("../data/ukrainian_female_names.txt");
const BUNDLED_RUSSIAN_FEMALE: &str = include_str!("../data/russian_female_names.txt");

/// A set of lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a word list, substituting an empty set if the file is missing
    /// or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(set) => set,
            Err(Error::ResourceNotFound(missing)) => {
                warn!(
                    path = %missing.display(),
                    "word list not found, classification accuracy will be reduced"
                );
                Self::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read word list");
                Self::new()
            }
        }
    }

    /// Loads a word list, failing with [`Error::ResourceNotFound`] if the
    /// file does not exist.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ResourceNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let set = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), words = set.len(), "loaded word list");
        Ok(set)
    }

    /// Parses a word list from a reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = HashSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = if index == 0 {
                line.trim_start_matches('\u{FEFF}')
            } else {
                line.as_str()
            };

            if line.starts_with('#') {
                continue;
            }

            let word = line.trim();
            if word.is_empty() {
                continue;
            }

            words.insert(word.to_lowercase());
        }

        Ok(Self { words })
    }

    /// Parses a list compiled into the crate.
    fn bundled(name: &str, text: &str) -> Self {
        match Self::from_reader(text.as_bytes()) {
            Ok(set) => set,
            Err(e) => {
                warn!(list = name, error = %e, "failed to parse bundled word list");
                Self::new()
            }
        }
    }

    /// Inserts a word (lowercased, trimmed).
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase())
    }

    /// Returns true if the word is in the set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the union of two sets.
    pub fn union(mut self, other: WordSet) -> Self {
        self.words.extend(other.words);
        self
    }

    /// Iterates over the words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word.as_ref());
        }
        set
    }
}

/// The word lists consumed by the classifier.
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    /// Male names that override every female signal.
    pub male_exceptions: WordSet,
    /// Keywords marking brand/business accounts.
    pub female_business: WordSet,
    /// Female first names (Ukrainian and Russian lists combined).
    pub female_names: WordSet,
}

impl WordLists {
    /// Loads the four list files from a directory.
    ///
    /// Missing files are replaced by empty sets with a warning.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let lists = Self {
            male_exceptions: WordSet::load(dir.join(MALE_EXCEPTIONS_FILE)),
            female_business: WordSet::load(dir.join(FEMALE_BUSINESS_FILE)),
            female_names: WordSet::load(dir.join(UKRAINIAN_FEMALE_FILE))
                .union(WordSet::load(dir.join(RUSSIAN_FEMALE_FILE))),
        };

        debug!(
            dir = %dir.display(),
            male_exceptions = lists.male_exceptions.len(),
            female_business = lists.female_business.len(),
            female_names = lists.female_names.len(),
            "word lists ready"
        );

        lists
    }

    /// Returns the lists compiled into the crate.
    pub fn load_default() -> Self {
        Self {
            male_exceptions: WordSet::bundled(MALE_EXCEPTIONS_FILE, BUNDLED_MALE_EXCEPTIONS),
            female_business: WordSet::bundled(FEMALE_BUSINESS_FILE, BUNDLED_FEMALE_BUSINESS),
            female_names: WordSet::bundled(UKRAINIAN_FEMALE_FILE, BUNDLED_UKRAINIAN_FEMALE)
                .union(WordSet::bundled(RUSSIAN_FEMALE_FILE, BUNDLED_RUSSIAN_FEMALE)),
        }
    }

    /// Starts building lists in memory.
    pub fn builder() -> WordListsBuilder {
        WordListsBuilder::default()
    }

    /// Returns true if every list is empty.
    pub fn is_empty(&self) -> bool {
        self.male_exceptions.is_empty()
            && self.female_business.is_empty()
            && self.female_names.is_empty()
    }
}

/// Builder for [`WordLists`].
#[derive(Debug, Default)]
pub struct WordListsBuilder {
    lists: WordLists,
}

impl WordListsBuilder {
    /// Adds male exception names.
    pub fn male_exceptions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.lists.male_exceptions.insert(word.as_ref());
        }
        self
    }

    /// Adds business keywords.
    pub fn female_business<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.lists.female_business.insert(word.as_ref());
        }
        self
    }

    /// Adds female names.
    pub fn female_names<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.lists.female_names.insert(word.as_ref());
        }
        self
    }

    /// Finishes the lists.
    pub fn build(self) -> WordLists {
        self.lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_reader_skips_comments_and_blanks() {
        let input = "# Ukrainian names\nOlena\n\n   \n  Marija  \n#comment\nОКСАНА\n";
        let set = WordSet::from_reader(Cursor::new(input)).unwrap();

        assert_eq!(set.len(), 3);
        assert!(set.contains("olena"));
        assert!(set.contains("marija"));
        assert!(set.contains("оксана"));
        assert!(!set.contains("# ukrainian names"));
    }

    #[test]
    fn test_from_reader_strips_bom() {
        let input = "\u{FEFF}# header\nanna\n";
        let set = WordSet::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains("anna"));
    }

    #[test]
    fn test_indented_hash_is_not_a_comment() {
        let set = WordSet::from_reader(Cursor::new("  #tag\n")).unwrap();
        assert!(set.contains("#tag"));
    }

    #[test]
    fn test_missing_file_is_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = WordSet::load(dir.path().join("nope.txt"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_try_load_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        match WordSet::try_load(&path) {
            Err(Error::ResourceNotFound(p)) => assert_eq!(p, path),
            other => panic!("Expected ResourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_dir_unions_female_lists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(UKRAINIAN_FEMALE_FILE), "olena\nоксана\n").unwrap();
        std::fs::write(dir.path().join(RUSSIAN_FEMALE_FILE), "svetlana\nolena\n").unwrap();
        std::fs::write(dir.path().join(MALE_EXCEPTIONS_FILE), "nikita\n").unwrap();

        let lists = WordLists::load_from_dir(dir.path());

        assert_eq!(lists.female_names.len(), 3);
        assert!(lists.female_names.contains("svetlana"));
        assert!(lists.male_exceptions.contains("nikita"));
        // Business keyword file absent: degraded, not failed
        assert!(lists.female_business.is_empty());
    }

    #[test]
    fn test_bundled_lists_load() {
        let lists = WordLists::load_default();
        assert!(!lists.male_exceptions.is_empty());
        assert!(!lists.female_business.is_empty());
        assert!(lists.female_names.contains("anna"));
    }

    #[test]
    fn test_bundled_lists_match_data_dir() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let from_dir = WordLists::load_from_dir(&data);
        let bundled = WordLists::load_default();

        assert_eq!(bundled.male_exceptions, from_dir.male_exceptions);
        assert_eq!(bundled.female_business, from_dir.female_business);
        assert_eq!(bundled.female_names, from_dir.female_names);
    }

    #[test]
    fn test_bundled_lists_ignore_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let lists = WordLists::load_from_dir(dir.path());
        assert!(lists.is_empty());
        assert!(!WordLists::load_default().is_empty());
    }

    #[test]
    fn test_builder_lowercases() {
        let lists = WordLists::builder()
            .female_names(["Anna", "  Olena "])
            .male_exceptions(["Nikita"])
            .female_business(["Beauty"])
            .build();

        assert!(lists.female_names.contains("anna"));
        assert!(lists.female_names.contains("olena"));
        assert!(lists.male_exceptions.contains("nikita"));
        assert!(lists.female_business.contains("beauty"));
        assert!(!lists.is_empty());
        assert!(WordLists::default().is_empty());
    }
}
