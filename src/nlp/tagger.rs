//! Part-of-speech tagging with Penn Treebank tags.
//!
//! [`BrillTagger`] runs harper's Brill tagger, trained on the Universal
//! Dependencies English treebank, and maps each universal tag onto the Penn
//! Treebank set. Nouns are split into common/proper and singular/plural;
//! the other classes map onto one representative Penn tag each.

use harper_brill::{FreqDict, UPOS};
use std::sync::Arc;

/// A token and its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Assigns exactly one tag to every token.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken>;
}

/// Statistical English tagger.
#[derive(Clone)]
pub struct BrillTagger {
    model: Arc<harper_brill::BrillTagger<FreqDict>>,
}

impl Default for BrillTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BrillTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrillTagger").finish_non_exhaustive()
    }
}

impl BrillTagger {
    /// Shares the bundled model; it is deserialized once per process.
    pub fn new() -> Self {
        Self {
            model: harper_brill::brill_tagger(),
        }
    }

    /// Penn tag for a word given its universal tag, if the model knew the word.
    fn penn_tag(word: &str, upos: Option<UPOS>) -> &'static str {
        let capitalised = word.chars().next().is_some_and(char::is_uppercase);

        match upos {
            Some(UPOS::NOUN) if capitalised => Self::proper_noun(word),
            Some(UPOS::NOUN) => Self::common_noun(word),
            Some(UPOS::PROPN) => Self::proper_noun(word),
            Some(UPOS::VERB) | Some(UPOS::AUX) => "VB",
            Some(UPOS::ADJ) => "JJ",
            Some(UPOS::ADV) => "RB",
            Some(UPOS::ADP) | Some(UPOS::SCONJ) => "IN",
            Some(UPOS::CCONJ) => "CC",
            Some(UPOS::DET) => "DT",
            Some(UPOS::PRON) => "PRP",
            Some(UPOS::NUM) => "CD",
            Some(UPOS::PART) => "RP",
            Some(UPOS::INTJ) => "UH",
            Some(UPOS::PUNCT) | Some(UPOS::SYM) => Self::symbol_tag(word),
            None => Self::unknown_tag(word, capitalised),
        }
    }

    /// Words outside the model vocabulary: alphabetic words back off to
    /// nouns, everything else is a number or a symbol.
    fn unknown_tag(word: &str, capitalised: bool) -> &'static str {
        if word.chars().any(char::is_alphabetic) {
            if capitalised {
                Self::proper_noun(word)
            } else {
                Self::common_noun(word)
            }
        } else if word.chars().any(|c| c.is_ascii_digit()) {
            "CD"
        } else {
            Self::symbol_tag(word)
        }
    }

    fn common_noun(word: &str) -> &'static str {
        if Self::is_plural(word) { "NNS" } else { "NN" }
    }

    fn proper_noun(word: &str) -> &'static str {
        if Self::is_plural(word) { "NNPS" } else { "NNP" }
    }

    /// Number is not part of the universal tag set, so it is read off the
    /// regular English plural ending.
    fn is_plural(word: &str) -> bool {
        let lower = word.to_lowercase();
        lower.chars().count() > 3
            && lower.ends_with('s')
            && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
    }

    fn symbol_tag(word: &str) -> &'static str {
        match word {
            "." | "!" | "?" => ".",
            "," => ",",
            ":" | ";" | "-" | "--" | "…" | "–" | "—" => ":",
            "(" | "[" | "{" => "(",
            ")" | "]" | "}" => ")",
            "\"" | "“" | "‘" | "`" => "``",
            "”" | "’" | "'" => "''",
            "$" => "$",
            "#" => "#",
            _ => "SYM",
        }
    }
}

impl Tagger for BrillTagger {
    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let tags = harper_brill::Tagger::tag_sentence(self.model.as_ref(), tokens);

        tokens
            .iter()
            .zip(tags.into_iter().chain(std::iter::repeat(None)))
            .map(|(word, upos)| TaggedToken::new(word.as_str(), Self::penn_tag(word, upos)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<String> {
        let tokens: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
        BrillTagger::new()
            .tag(&tokens)
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn test_one_tag_per_token() {
        let tokens: Vec<String> = ["a", "qwzx", "!", "42"].map(String::from).to_vec();
        let tagged = BrillTagger::new().tag(&tokens);
        assert_eq!(tagged.len(), 4);
        assert_eq!(tagged[1].word, "qwzx");
    }

    #[test]
    fn test_simple_sentence() {
        assert_eq!(tags("This is the first title"), vec!["PRP", "VB", "DT", "JJ", "NN"]);
    }

    #[test]
    fn test_list_of_nouns() {
        assert_eq!(
            tags("Title two with more nouns : apple , dog , cat"),
            vec!["NNP", "CD", "IN", "RB", "NNS", ":", "NN", ",", "NN", ",", "NN"]
        );
    }

    #[test]
    fn test_verbs_between_nouns() {
        assert_eq!(tags("Dogs love cats"), vec!["NNPS", "VB", "NNS"]);
        assert_eq!(tags("Scientists discover new species"), vec!["NNPS", "VB", "JJ", "NNS"]);
    }

    #[test]
    fn test_noun_after_determiner() {
        assert_eq!(
            tags("I need some help with my car"),
            vec!["PRP", "VB", "DT", "NN", "IN", "PRP", "NN"]
        );
        assert_eq!(tags("The dog chased the cat"), vec!["DT", "NN", "VB", "DT", "NN"]);
    }

    #[test]
    fn test_unknown_words_back_off_to_nouns() {
        assert_eq!(BrillTagger::penn_tag("flurbs", None), "NNS");
        assert_eq!(BrillTagger::penn_tag("flurb", None), "NN");
        assert_eq!(BrillTagger::penn_tag("Flurb", None), "NNP");
        assert_eq!(BrillTagger::penn_tag("2024", None), "CD");
        assert_eq!(BrillTagger::penn_tag("🐶", None), "SYM");
    }

    #[test]
    fn test_noun_number_and_case() {
        assert_eq!(BrillTagger::penn_tag("cats", Some(UPOS::NOUN)), "NNS");
        assert_eq!(BrillTagger::penn_tag("glass", Some(UPOS::NOUN)), "NN");
        assert_eq!(BrillTagger::penn_tag("bus", Some(UPOS::NOUN)), "NN");
        assert_eq!(BrillTagger::penn_tag("Paris", Some(UPOS::PROPN)), "NNP");
        assert_eq!(BrillTagger::penn_tag("Title", Some(UPOS::NOUN)), "NNP");
    }

    #[test]
    fn test_punctuation_tags() {
        assert_eq!(BrillTagger::penn_tag(".", Some(UPOS::PUNCT)), ".");
        assert_eq!(BrillTagger::penn_tag(",", Some(UPOS::PUNCT)), ",");
        assert_eq!(BrillTagger::penn_tag(":", None), ":");
        assert_eq!(BrillTagger::penn_tag("(", None), "(");
        assert_eq!(BrillTagger::penn_tag("'", None), "''");
    }
}
