//! Inference service boundary.

pub mod anthropic;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One request against the messages endpoint. The analyzer attaches a
/// tool definition; the judge sends none and reads free text back.
#[derive(Debug, Clone)]
pub struct MessagesRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub tools: Vec<ToolSpec>,
}

/// A callable tool offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Response content as emitted by the service: free-text segments and
/// structured tool invocations, in emission order. Unknown block kinds
/// deserialize to `Other` and are skipped by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

/// Seam between the pipeline and the remote model, so both clients can
/// be driven by fakes in tests. No retry contract: failures propagate.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn messages(&self, req: MessagesRequest) -> anyhow::Result<MessagesResponse>;
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_block_kinds_deserialize_to_other() {
        let raw = r#"[
            {"type": "text", "text": "hi"},
            {"type": "thinking", "thinking": "..."},
            {"type": "tool_use", "id": "t1", "name": "create_alert", "input": {}}
        ]"#;
        let blocks: Vec<ContentBlock> = serde_json::from_str(raw).unwrap();
        assert!(matches!(blocks[0], ContentBlock::Text { .. }));
        assert!(matches!(blocks[1], ContentBlock::Other));
        assert!(matches!(blocks[2], ContentBlock::ToolUse { .. }));
    }
}
