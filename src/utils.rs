//! Utility functions shared by the HTTP adapters.

use crate::error::ApiFailure;
use std::time::Duration;

/// Builds an HTTP client with the given user agent and request timeout.
pub fn create_http_client(
    user_agent: &str,
    timeout_sec: u64,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_sec))
        .build()
}

/// Checks if an HTTP response is successful, and if not, returns a detailed error.
///
/// This helper extracts both the status code and response body for better error messages.
pub async fn check_response_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiFailure> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiFailure { status, body });
    }
    Ok(response)
}

/// Shortens text for log output, on a character boundary.
pub fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
