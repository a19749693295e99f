//! Translation backends.
//!
//! Every backend translates one piece of text per call and reports failures
//! as [`TranslationError`]; nothing here retries.

mod google;
mod openai;

pub use google::GoogleTranslator;
pub use openai::OpenAiTranslator;

use crate::config::{TranslationConfig, TranslatorBackend};
use crate::error::TranslationError;
use async_trait::async_trait;

/// Translates text between two languages.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &'static str;

    /// Translates `text` from `source_lang` to `target_lang` (ISO 639-1 codes).
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError>;
}

/// Builds the backend selected in the configuration.
pub fn from_config(config: &TranslationConfig) -> Result<Box<dyn Translator>, TranslationError> {
    let translator: Box<dyn Translator> = match config.backend {
        TranslatorBackend::Google => {
            Box::new(GoogleTranslator::new(config.google.clone(), config.timeout_sec)?)
        }
        TranslatorBackend::OpenAi => {
            if !config.openai.is_configured() {
                return Err(TranslationError::InvalidConfig(
                    "translation.openai.key is not set".to_string(),
                ));
            }
            Box::new(OpenAiTranslator::new(
                config.openai.clone(),
                config.prompt.clone(),
                config.timeout_sec,
            )?)
        }
    };
    Ok(translator)
}
