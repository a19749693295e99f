//! Noun extraction from post titles.

use super::classifier::WordClassifier;
use super::dictionary::Dictionary;
use super::tagger::{BrillTagger, Tagger};
use super::tokenizer::{Tokenizer, UnicodeTokenizer};
use std::collections::HashSet;
use std::sync::Arc;

/// Distinct nouns in first-seen order.
///
/// Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct NounSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl NounSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a noun, returning false if it was already present.
    pub fn insert(&mut self, noun: impl Into<String>) -> bool {
        let noun = noun.into();
        if self.seen.contains(&noun) {
            return false;
        }
        self.seen.insert(noun.clone());
        self.order.push(noun);
        true
    }

    pub fn contains(&self, noun: &str) -> bool {
        self.seen.contains(noun)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl PartialEq for NounSet {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for NounSet {}

impl<S: Into<String>> Extend<S> for NounSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for noun in iter {
            self.insert(noun);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for NounSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NounSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for NounSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a> IntoIterator for &'a NounSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Tokenizes, tags and filters titles down to dictionary nouns.
#[derive(Clone)]
pub struct NounExtractor {
    tokenizer: Arc<dyn Tokenizer>,
    tagger: Arc<dyn Tagger>,
    classifier: WordClassifier,
}

impl NounExtractor {
    /// Extractor using the built-in tokenizer and tagger.
    pub fn new(dictionary: Dictionary) -> Self {
        Self::with_components(
            Arc::new(UnicodeTokenizer::new()),
            Arc::new(BrillTagger::new()),
            dictionary,
        )
    }

    pub fn with_components(
        tokenizer: Arc<dyn Tokenizer>,
        tagger: Arc<dyn Tagger>,
        dictionary: Dictionary,
    ) -> Self {
        Self {
            tokenizer,
            tagger,
            classifier: WordClassifier::new(dictionary),
        }
    }

    /// Common nouns of one title that are dictionary words, in original case.
    pub fn extract_nouns(&self, title: &str) -> NounSet {
        let tokens = self.tokenizer.tokenize(title);

        self.tagger
            .tag(&tokens)
            .into_iter()
            .filter(|token| self.classifier.is_dictionary_noun(&token.word, &token.tag))
            .map(|token| token.word)
            .collect()
    }

    /// Union of the nouns of every title.
    pub fn extract_nouns_from_titles<I, S>(&self, titles: I) -> NounSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nouns = NounSet::new();
        for title in titles {
            nouns.extend(self.extract_nouns(title.as_ref()));
        }
        nouns
    }
}

impl std::fmt::Debug for NounExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NounExtractor")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tagger::TaggedToken;

    fn dictionary() -> Dictionary {
        Dictionary::from_words([
            "this", "is", "the", "first", "title", "two", "with", "more", "noun", "apple",
            "dog", "cat", "love", "cats", "park",
        ])
    }

    fn set(words: &[&str]) -> NounSet {
        words.iter().copied().collect()
    }

    #[test]
    fn test_extract_nouns_from_titles() {
        let extractor = NounExtractor::new(dictionary());
        let titles = ["This is the first title", "Title two with more nouns: apple, dog, cat"];

        let nouns = extractor.extract_nouns_from_titles(titles);
        assert_eq!(nouns, set(&["title", "apple", "dog", "cat"]));
        assert_eq!(nouns.as_slice(), ["title", "apple", "dog", "cat"]);
    }

    #[test]
    fn test_no_titles_no_nouns() {
        let extractor = NounExtractor::new(dictionary());
        let nouns = extractor.extract_nouns_from_titles(Vec::<String>::new());
        assert!(nouns.is_empty());
    }

    #[test]
    fn test_extract_nouns_keeps_case_and_dedupes() {
        let extractor = NounExtractor::new(dictionary());
        let nouns = extractor.extract_nouns("A dog. The dog and the cat.");
        assert_eq!(nouns.as_slice(), ["dog", "cat"]);
    }

    #[test]
    fn test_builtin_dictionary_example() {
        let extractor = NounExtractor::new(Dictionary::builtin());
        let titles = ["This is the first title", "Title two with more nouns: apple, dog, cat"];

        let nouns = extractor.extract_nouns_from_titles(titles);
        assert_eq!(nouns, set(&["title", "apple", "dog", "cat"]));
    }

    #[test]
    fn test_verbs_are_not_nouns() {
        let extractor = NounExtractor::new(dictionary());
        assert_eq!(extractor.extract_nouns("Dogs love cats").as_slice(), ["cats"]);
        assert_eq!(
            extractor.extract_nouns("Man finds dog in the park").as_slice(),
            ["dog", "park"]
        );
    }

    struct WhitespaceTokenizer;

    impl Tokenizer for WhitespaceTokenizer {
        fn sent_tokenize(&self, text: &str) -> Vec<String> {
            vec![text.to_string()]
        }

        fn word_tokenize(&self, sentence: &str) -> Vec<String> {
            sentence.split_whitespace().map(str::to_string).collect()
        }
    }

    /// Tags every token as a singular noun.
    struct NounTagger;

    impl Tagger for NounTagger {
        fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
            tokens.iter().map(|t| TaggedToken::new(t.as_str(), "NN")).collect()
        }
    }

    #[test]
    fn test_custom_components_filter_by_dictionary() {
        let extractor = NounExtractor::with_components(
            Arc::new(WhitespaceTokenizer),
            Arc::new(NounTagger),
            dictionary(),
        );

        let nouns = extractor.extract_nouns("Apple nein dog 0 . Dog");
        assert_eq!(nouns.as_slice(), ["Apple", "dog", "Dog"]);
    }

    #[test]
    fn test_noun_set_equality_ignores_order() {
        assert_eq!(set(&["dog", "cat"]), set(&["cat", "dog", "cat"]));
        assert_ne!(set(&["dog"]), set(&["dog", "cat"]));
    }
}
