//! Google Translate backend using the public `translate_a/single` endpoint.

use super::Translator;
use crate::config::GoogleConfig;
use crate::error::TranslationError;
use crate::utils::{check_response_status, create_http_client, snippet};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// User agent sent with every request; the endpoint rejects empty ones.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Translator backed by the keyless Google Translate endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleTranslator {
    pub fn new(config: GoogleConfig, timeout_sec: u64) -> Result<Self, TranslationError> {
        Ok(Self {
            client: create_http_client(USER_AGENT, timeout_sec)?,
            config,
        })
    }

    fn request_url(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Url, TranslationError> {
        let mut url = Url::parse(&self.config.base_url)
            .and_then(|base| base.join("translate_a/single"))
            .map_err(|e| TranslationError::InvalidConfig(format!("translation.google.base_url: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", source_lang)
            .append_pair("tl", target_lang)
            .append_pair("dt", "t")
            .append_pair("q", text);

        Ok(url)
    }

    /// Joins the translated segments of a response.
    ///
    /// The body is a nested array whose first element lists
    /// `[translated, original, ...]` segments.
    fn parse_response(body: &Value) -> Result<String, TranslationError> {
        let segments = body.get(0).and_then(Value::as_array).ok_or_else(|| {
            TranslationError::ParseError(format!(
                "unexpected response shape: {}",
                snippet(&body.to_string(), 120)
            ))
        })?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(TranslationError::Refused("Empty response".to_string()));
        }

        Ok(translated.to_string())
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "Google Translate"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let url = self.request_url(text, source_lang, target_lang)?;

        let response = self.client.get(url).send().await?;
        let response = check_response_status(response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        let translated = Self::parse_response(&body)?;
        debug!(text, translated = %translated, "translated");
        Ok(translated)
    }
}
