//! Noun and dictionary checks applied to tagged tokens.

use super::dictionary::Dictionary;

/// Penn Treebank tags for singular and plural common nouns.
pub const NOUN_TAGS: [&str; 2] = ["NN", "NNS"];

/// True if `tag` is exactly `NN` or `NNS`. Case-sensitive.
pub fn is_noun(tag: &str) -> bool {
    NOUN_TAGS.contains(&tag)
}

/// Decides which tokens count as English words.
#[derive(Debug, Clone)]
pub struct WordClassifier {
    dictionary: Dictionary,
}

impl WordClassifier {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// True if the lower-cased word is in the dictionary.
    pub fn is_word_in_dictionary(&self, word: &str) -> bool {
        !word.is_empty() && self.dictionary.contains(&word.to_lowercase())
    }

    /// True if the token is tagged as a common noun and is a known word.
    pub fn is_dictionary_noun(&self, word: &str, tag: &str) -> bool {
        is_noun(tag) && self.is_word_in_dictionary(word)
    }
}
