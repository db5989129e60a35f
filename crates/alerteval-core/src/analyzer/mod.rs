//! Analyzer phase: one tool-use inference call per scenario.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::model::{AlertSuggestion, AnalysisResult};
use crate::prompts::PromptStore;
use crate::providers::{ContentBlock, MessagesRequest, ModelClient, ToolSpec};

pub const ANALYZER_MAX_TOKENS: u32 = 2048;

const CREATE_ALERT_TOOL: &str = "create_alert";

/// Proposes price alerts for a set of positions and current prices.
pub struct Analyzer {
    client: Arc<dyn ModelClient>,
    prompts: PromptStore,
}

fn create_alert_tool() -> ToolSpec {
    ToolSpec {
        name: CREATE_ALERT_TOOL.to_string(),
        description: "Create a price alert for a commodity position".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "commodity_code": {
                    "type": "string",
                    "description": "The commodity code (e.g., CORN)",
                },
                "condition": {
                    "type": "string",
                    "enum": ["above", "below"],
                    "description": "Whether the alert triggers when price goes above or below the threshold",
                },
                "threshold_price": {
                    "type": "number",
                    "description": "The price threshold that triggers the alert",
                },
                "notes": {
                    "type": "string",
                    "description": "Explanation of why this alert is recommended",
                },
            },
            "required": ["commodity_code", "condition", "threshold_price", "notes"],
        }),
    }
}

impl Analyzer {
    pub fn new(client: Arc<dyn ModelClient>, prompts: PromptStore) -> Self {
        Self { client, prompts }
    }

    /// One inference call: positions and prices go in pretty-printed,
    /// free text comes back as `reasoning` and every `create_alert`
    /// tool invocation becomes a suggestion, both in emission order.
    ///
    /// Zero tool invocations is not an error; `suggestions` is simply
    /// empty. There is no fallback path here, unlike the judge: the
    /// tool schema constrains the output enough to trust it.
    pub async fn analyze(
        &self,
        positions: &[Value],
        prices: &[Value],
        prompt_version: &str,
    ) -> anyhow::Result<AnalysisResult> {
        let system = self.prompts.analyzer_prompt(prompt_version)?;
        let user = format!(
            "Here are the user's current commodity positions:\n{}\n\n\
             Here are the current market prices:\n{}\n\n\
             Please analyze these positions and suggest appropriate price alerts. \
             For each suggestion, use the create_alert tool.",
            serde_json::to_string_pretty(positions)?,
            serde_json::to_string_pretty(prices)?,
        );

        let response = self
            .client
            .messages(MessagesRequest {
                system,
                user,
                max_tokens: ANALYZER_MAX_TOKENS,
                tools: vec![create_alert_tool()],
            })
            .await?;

        let mut reasoning_parts: Vec<String> = Vec::new();
        let mut suggestions: Vec<AlertSuggestion> = Vec::new();

        for block in response.content {
            match block {
                ContentBlock::Text { text } => reasoning_parts.push(text),
                ContentBlock::ToolUse { name, input, .. } if name == CREATE_ALERT_TOOL => {
                    suggestions.push(serde_json::from_value(input)?);
                }
                _ => {}
            }
        }

        tracing::debug!(
            provider = self.client.provider_name(),
            suggestions = suggestions.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            reasoning: reasoning_parts.join("\n"),
            suggestions,
        })
    }
}
