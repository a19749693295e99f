//! English noun extraction.
//!
//! Text is split into sentences and word tokens, each token gets a Penn
//! Treebank part-of-speech tag, and tokens tagged `NN`/`NNS` whose
//! lower-cased form is in the [`Dictionary`] are kept.

pub mod classifier;
pub mod dictionary;
pub mod extractor;
pub mod tagger;
pub mod tokenizer;

pub use classifier::{NOUN_TAGS, WordClassifier, is_noun};
pub use dictionary::Dictionary;
pub use extractor::{NounExtractor, NounSet};
pub use tagger::{BrillTagger, TaggedToken, Tagger};
pub use tokenizer::{Tokenizer, UnicodeTokenizer};
