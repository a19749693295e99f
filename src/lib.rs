//! Reddit noun translator - builds vocabulary lists from trending post titles.
//!
//! This library provides functionality for:
//! - Fetching ranked post titles from Reddit
//! - Extracting common English nouns with a tokenizer, tagger and word list
//! - Translating each noun through Google Translate or an OpenAI-compatible API
//! - Writing `original : translated` pairs to a text file

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod pipeline;
pub mod sources;
pub mod translators;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, RedditCredentials};
pub use console::Console;
pub use error::{ConfigError, OutputError, PipelineError, SourceError, TranslationError};
pub use nlp::{Dictionary, NounExtractor, NounSet};
pub use pipeline::{NounTranslator, PipelineSettings, RunSummary, TranslationPair, write_pairs};
pub use sources::{PostSource, RedditSource};
pub use translators::Translator;
