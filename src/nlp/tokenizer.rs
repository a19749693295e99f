//! Sentence and word segmentation.
//!
//! [`UnicodeTokenizer`] uses the Unicode text segmentation rules (UAX #29).
//! Punctuation becomes its own token; contractions such as `don't` stay whole,
//! which is also how the tagger model was trained.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences, and sentences into word tokens.
pub trait Tokenizer: Send + Sync {
    fn sent_tokenize(&self, text: &str) -> Vec<String>;

    fn word_tokenize(&self, sentence: &str) -> Vec<String>;

    /// Tokens of every sentence in `text`, in order.
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.sent_tokenize(text)
            .iter()
            .flat_map(|sentence| self.word_tokenize(sentence))
            .collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn sent_tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn word_tokenize(&self, sentence: &str) -> Vec<String> {
        sentence
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenize_splits_punctuation() {
        let tokens = UnicodeTokenizer::new().word_tokenize("Title two with more nouns: apple, dog, cat");
        assert_eq!(
            tokens,
            vec!["Title", "two", "with", "more", "nouns", ":", "apple", ",", "dog", ",", "cat"]
        );
    }

    #[test]
    fn test_sent_tokenize() {
        let sentences = UnicodeTokenizer::new().sent_tokenize("A dog. The dog and the cat.");
        assert_eq!(sentences, vec!["A dog.", "The dog and the cat."]);
    }

    #[test]
    fn test_contractions_stay_whole() {
        let tokens = UnicodeTokenizer::new().word_tokenize("I don't know");
        assert_eq!(tokens, vec!["I", "don't", "know"]);
    }

    #[test]
    fn test_tokenize_across_sentences() {
        let tokens = UnicodeTokenizer::new().tokenize("Hi there! How are you?");
        assert_eq!(tokens, vec!["Hi", "there", "!", "How", "are", "you", "?"]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = UnicodeTokenizer::new();
        assert!(tokenizer.sent_tokenize("").is_empty());
        assert!(tokenizer.sent_tokenize("   \n").is_empty());
        assert!(tokenizer.tokenize("").is_empty());
    }
}
