//! Reddit noun translator CLI - translates the nouns of trending post titles.

use anyhow::{Context, Result};
use clap::Parser;
use reddit_noun_translator::config::{Config, RedditCredentials, TranslatorBackend};
use reddit_noun_translator::console::Console;
use reddit_noun_translator::logging::init_logging;
use reddit_noun_translator::nlp::{Dictionary, NounExtractor};
use reddit_noun_translator::pipeline::{NounTranslator, PipelineSettings};
use reddit_noun_translator::sources::RedditSource;
use reddit_noun_translator::translators;
use std::path::PathBuf;

/// Translates the nouns found in trending Reddit post titles.
#[derive(Parser, Debug)]
#[command(name = "reddit-noun-translator")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Reddit credentials JSON file.
    #[arg(short, long, default_value = "keys/credentials.json")]
    credentials: PathBuf,

    /// Language to translate the nouns into (ISO 639-1 code).
    #[arg(short = 'l', long, alias = "target_language")]
    target_language: Option<String>,

    /// Number of post titles to download.
    #[arg(short, long, alias = "num_posts", value_parser = clap::value_parser!(u32).range(1..))]
    num_posts: Option<u32>,

    /// File the translated pairs are written to.
    #[arg(short, long, alias = "output_file")]
    output_file: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word list used to filter nouns, instead of the built-in one.
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Translation backend: google or openai.
    #[arg(long)]
    backend: Option<TranslatorBackend>,
}

impl Args {
    /// Overrides config values with the ones given on the command line.
    fn apply(&self, config: &mut Config) {
        if let Some(language) = &self.target_language {
            config.translation.target_language = language.clone();
        }
        if let Some(num_posts) = self.num_posts {
            config.pipeline.num_posts = num_posts as usize;
        }
        if let Some(output_file) = &self.output_file {
            config.pipeline.output_file = output_file.clone();
        }
        if let Some(dictionary) = &self.dictionary {
            config.dictionary.path = Some(dictionary.clone());
        }
        if let Some(backend) = self.backend {
            config.translation.backend = backend;
        }
    }
}

/// Configuration, credentials, dictionary, run.
const STAGES: usize = 4;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let console = Console::new(STAGES);

    console.heading("Reddit Noun Translator");

    console.stage("Loading configuration");
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(&config.logging).context("Failed to initialise logging")?;

    console.stage("Loading credentials");
    let credentials = RedditCredentials::load_from(&args.credentials).with_context(|| {
        format!(
            "Failed to load credentials from {}",
            args.credentials.display()
        )
    })?;

    console.stage("Loading dictionary");
    let dictionary = match &config.dictionary.path {
        Some(path) => Dictionary::load(path).context("Failed to load dictionary")?,
        None => Dictionary::builtin(),
    };
    console.detail(&format!("{} words", dictionary.len()));

    let source = RedditSource::new(credentials, config.reddit.clone())
        .context("Failed to create Reddit client")?;
    let translator =
        translators::from_config(&config.translation).context("Failed to create translator")?;
    let translator_name = translator.name();

    let pipeline = NounTranslator::new(
        Box::new(source),
        NounExtractor::new(dictionary),
        translator,
        PipelineSettings::from_config(&config),
    );

    console.stage(&format!(
        "Translating nouns of {} posts from r/{}",
        pipeline.settings().num_posts,
        config.reddit.subreddit
    ));
    console.detail(&format!(
        "{} -> {} with {}",
        config.translation.source_language,
        config.translation.target_language,
        translator_name
    ));

    match pipeline.run().await {
        Ok(summary) => {
            console.summary(&summary);
            Ok(())
        }
        Err(e) => {
            console.failure(&e);
            Err(e).context("Run failed")
        }
    }
}
