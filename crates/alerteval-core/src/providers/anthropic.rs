use super::{MessagesRequest, MessagesResponse, ModelClient};
use async_trait::async_trait;
use serde_json::json;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Production model for both the analyzer and the judge.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Anthropic Messages API client. One POST per call; no retries and no
/// timeout beyond the transport default, so a failure or stall belongs
/// to the caller.
pub struct AnthropicClient {
    pub model: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// The credential is passed in explicitly; this type never reads
    /// the process environment.
    pub fn new(model: String, api_key: String) -> Self {
        Self {
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn messages(&self, req: MessagesRequest) -> anyhow::Result<MessagesResponse> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": req.max_tokens,
            "system": req.system,
            "messages": [{"role": "user", "content": req.user}],
        });
        if !req.tools.is_empty() {
            body["tools"] = serde_json::to_value(&req.tools)?;
        }

        tracing::debug!(model = %self.model, max_tokens = req.max_tokens, "calling messages API");

        let resp = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!("Anthropic messages API error (status {}): {}", status, error_text);
        }

        Ok(resp.json().await?)
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}
