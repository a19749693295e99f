//! Translation through an OpenAI-compatible chat completions API.

use super::Translator;
use crate::config::ApiConfig;
use crate::error::TranslationError;
use crate::utils::{check_response_status, create_http_client};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Refusal phrases that indicate the model declined to translate.
static REFUSAL_PHRASES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "i'm sorry",
        "i cannot",
        "i am unable",
        "as an ai",
        "my apologies",
    ]
});

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    /// Role: "system", "user", or "assistant".
    role: String,
    content: String,
}

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// A single choice in the response.
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Translator asking a chat model for one word at a time.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_config: ApiConfig,
    /// System prompt with `{source}`/`{target}` placeholders.
    prompt: String,
}

impl OpenAiTranslator {
    pub fn new(
        api_config: ApiConfig,
        prompt: String,
        timeout_sec: u64,
    ) -> Result<Self, TranslationError> {
        Ok(Self {
            client: create_http_client(USER_AGENT, timeout_sec)?,
            api_config,
            prompt,
        })
    }

    fn build_request(&self, text: &str, source_lang: &str, target_lang: &str) -> ChatRequest {
        let system = self
            .prompt
            .replace("{source}", source_lang)
            .replace("{target}", target_lang);

        ChatRequest {
            model: self.api_config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system,
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.0,
        }
    }

    /// Extracts the reply text, rejecting empty answers and refusals.
    fn extract_reply(response: ChatResponse) -> Result<String, TranslationError> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let trimmed = content.trim().trim_matches(['"', '\'']).trim();
        if trimmed.is_empty() {
            return Err(TranslationError::Refused("Empty response".to_string()));
        }

        let lower = trimmed.to_lowercase();
        if let Some(phrase) = REFUSAL_PHRASES.iter().find(|p| lower.starts_with(*p)) {
            return Err(TranslationError::Refused(format!(
                "Response starts with refusal phrase: {}",
                phrase
            )));
        }

        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn name(&self) -> &'static str {
        "OpenAI-compatible"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError> {
        let request = self.build_request(text, source_lang, target_lang);
        let url = format!(
            "{}/chat/completions",
            self.api_config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_config.key)
            .json(&request)
            .send()
            .await?;
        let response = check_response_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        let translated = Self::extract_reply(body)?;
        debug!(text, translated = %translated, model = %self.api_config.model, "translated");
        Ok(translated)
    }
}
