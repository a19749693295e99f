//! Read-only set of known English words.

use crate::error::DictionaryError;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Base-form English words shipped with the binary.
const BUILTIN_WORDS: &str = include_str!("../../data/english_words.txt");

/// Immutable word list, loaded once and shared by every classifier.
///
/// Cloning is cheap; all clones share the same set. Entries are stored as
/// written, lookups are expected to pass lower-cased words, so capitalised
/// entries (proper names in most system word lists) never match.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Arc<HashSet<String>>,
}

impl Dictionary {
    /// Loads a newline-separated word list. Blank lines and lines starting
    /// with `#` are skipped.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::parse(&content);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), words = dictionary.len(), "dictionary loaded");
        Ok(dictionary)
    }

    /// The bundled list of singular, lower-case English words. Plural forms
    /// are absent, so only the base form of a noun matches.
    pub fn builtin() -> Self {
        let dictionary = Self::parse(BUILTIN_WORDS);
        tracing::debug!(words = dictionary.len(), "built-in dictionary loaded");
        dictionary
    }

    /// One word per line. Blank lines and lines starting with `#` are skipped.
    fn parse(content: &str) -> Self {
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Builds a dictionary from in-memory words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Exact membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_word_list() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "# comment\napple\n\n  dog \nAlice\n").unwrap();

        let dictionary = Dictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.contains("apple"));
        assert!(dictionary.contains("dog"));
        assert!(dictionary.contains("Alice"));
        assert!(!dictionary.contains("alice"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dictionary::load(Path::new("/nonexistent/words"));
        assert!(matches!(result, Err(DictionaryError::Read { .. })));
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "\n# nothing here\n").unwrap();

        let result = Dictionary::load(file.path());
        assert!(matches!(result, Err(DictionaryError::Empty { .. })));
    }

    #[test]
    fn test_builtin_word_list() {
        let dictionary = Dictionary::builtin();
        assert!(dictionary.len() > 10_000);
        for word in ["title", "apple", "dog", "cat", "first"] {
            assert!(dictionary.contains(word), "{word} missing");
        }
        assert!(!dictionary.contains("nouns"));
        assert!(!dictionary.contains("dogs"));
        assert!(!dictionary.contains("# English base-form word list (one lower-case word per line)."));
    }

    #[test]
    fn test_clones_share_words() {
        let dictionary = Dictionary::from_words(["cat"]);
        let clone = dictionary.clone();
        assert!(Arc::ptr_eq(&dictionary.words, &clone.words));
    }
}
