//! The fetch → extract → translate → write pipeline.
//!
//! Stages run strictly in order and any failure aborts the run. The output
//! file is only written after every noun has been translated, so a failed
//! run leaves a previous output untouched.

use crate::config::Config;
use crate::error::{OutputError, PipelineError};
use crate::logging::StageTimer;
use crate::nlp::{NounExtractor, NounSet};
use crate::sources::PostSource;
use crate::translators::Translator;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Separator between the original word and its translation on an output line.
pub const PAIR_SEPARATOR: &str = " : ";

/// An original noun and its translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub original: String,
    pub translated: String,
}

impl TranslationPair {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }
}

impl fmt::Display for TranslationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.original, PAIR_SEPARATOR, self.translated)
    }
}

/// Reads a line written by [`write_pairs`] back into a pair.
///
/// Splits on the first separator, so a translation containing `" : "` is
/// kept whole but an original containing it is not recoverable.
pub fn parse_pair_line(line: &str) -> Option<TranslationPair> {
    let line = line.trim_end_matches(['\r', '\n']);
    line.split_once(PAIR_SEPARATOR)
        .map(|(original, translated)| TranslationPair::new(original, translated))
}

/// Writes one `"{original} : {translated}"` line per pair, replacing any
/// existing file and creating the parent directory if needed.
pub fn write_pairs(pairs: &[TranslationPair], path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    for pair in pairs {
        writeln!(writer, "{}", pair).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    Ok(())
}

/// Run parameters handed to [`NounTranslator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub source_language: String,
    pub target_language: String,
    pub num_posts: usize,
    pub output_file: PathBuf,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_language: config.translation.source_language.clone(),
            target_language: config.translation.target_language.clone(),
            num_posts: config.pipeline.num_posts,
            output_file: config.pipeline.output_file.clone(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub titles: usize,
    pub nouns: usize,
    pub pairs: usize,
    pub output_file: PathBuf,
}

/// Downloads post titles, extracts their nouns, translates them and writes
/// the pairs to a file.
pub struct NounTranslator {
    source: Box<dyn PostSource>,
    extractor: NounExtractor,
    translator: Box<dyn Translator>,
    settings: PipelineSettings,
}

impl NounTranslator {
    pub fn new(
        source: Box<dyn PostSource>,
        extractor: NounExtractor,
        translator: Box<dyn Translator>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            source,
            extractor,
            translator,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub async fn download_post_titles(&self) -> Result<Vec<String>, PipelineError> {
        let timer = StageTimer::start("download_post_titles");
        let titles = self.source.fetch_titles(self.settings.num_posts).await?;
        timer.finish_with(&titles);
        Ok(titles)
    }

    pub fn extract_nouns_from_titles(&self, titles: &[String]) -> NounSet {
        let timer = StageTimer::start("extract_nouns_from_titles");
        let nouns = self.extractor.extract_nouns_from_titles(titles);
        timer.finish_with(nouns.as_slice());
        nouns
    }

    /// Translates each noun in set order, one request at a time.
    pub async fn make_translated_noun_pairs(
        &self,
        nouns: &NounSet,
    ) -> Result<Vec<TranslationPair>, PipelineError> {
        let timer = StageTimer::start("make_translated_noun_pairs");
        let mut pairs = Vec::with_capacity(nouns.len());

        for noun in nouns {
            let translated = self
                .translator
                .translate(
                    noun,
                    &self.settings.source_language,
                    &self.settings.target_language,
                )
                .await
                .map_err(|source| PipelineError::TranslationFailure {
                    word: noun.clone(),
                    source,
                })?;
            pairs.push(TranslationPair::new(noun.as_str(), translated));
        }

        timer.finish_with(&pairs);
        Ok(pairs)
    }

    pub fn write_pairs_to_output_file(
        &self,
        pairs: &[TranslationPair],
    ) -> Result<(), PipelineError> {
        let timer = StageTimer::start("write_pairs_to_output_file");
        write_pairs(pairs, &self.settings.output_file)?;
        timer.finish();
        Ok(())
    }

    /// Runs every stage in order.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        info!(
            source = self.source.name(),
            translator = self.translator.name(),
            num_posts = self.settings.num_posts,
            target_language = %self.settings.target_language,
            "starting run"
        );

        let titles = self.download_post_titles().await?;
        let nouns = self.extract_nouns_from_titles(&titles);
        let pairs = self.make_translated_noun_pairs(&nouns).await?;
        self.write_pairs_to_output_file(&pairs)?;

        debug!(output = %self.settings.output_file.display(), "run complete");
        Ok(RunSummary {
            titles: titles.len(),
            nouns: nouns.len(),
            pairs: pairs.len(),
            output_file: self.settings.output_file.clone(),
        })
    }
}
