//! Judge phase: scores a model response against ground truth.

mod parse;

use std::sync::Arc;

use crate::errors::EvalError;
use crate::model::JudgmentResult;
use crate::prompts::PromptStore;
use crate::providers::{ContentBlock, MessagesRequest, ModelClient};

pub const JUDGE_MAX_TOKENS: u32 = 1024;

/// Scores one analyzer response per call. Judge output is free text,
/// so structured parsing is best-effort with a fail-closed fallback
/// (see [`parse`]); the only hard requirement is that the service
/// returns at least one text block.
pub struct Judge {
    client: Arc<dyn ModelClient>,
    prompts: PromptStore,
}

impl Judge {
    pub fn new(client: Arc<dyn ModelClient>, prompts: PromptStore) -> Self {
        Self { client, prompts }
    }

    pub async fn judge(
        &self,
        scenario_description: &str,
        eval_type: &str,
        ground_truth: &str,
        model_response: &str,
        prompt_version: &str,
    ) -> anyhow::Result<JudgmentResult> {
        let system = self.prompts.judge_prompt(prompt_version)?;
        let user = format!(
            "## Scenario\n{scenario_description}\n\n\
             ## Evaluation Type\n{eval_type}\n\n\
             ## Ground Truth\n{ground_truth}\n\n\
             ## Model Response\n{model_response}\n\n\
             Please evaluate this response and provide your judgment."
        );

        let response = self
            .client
            .messages(MessagesRequest {
                system,
                user,
                max_tokens: JUDGE_MAX_TOKENS,
                tools: Vec::new(),
            })
            .await?;

        let text = response
            .content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .ok_or(EvalError::EmptyResponse)?;

        let judgment = parse::parse_judgment(text);
        tracing::debug!(
            provider = self.client.provider_name(),
            outcome = %judgment.outcome,
            "judgment complete"
        );
        Ok(judgment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use crate::providers::MessagesResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedClient {
        responses: Mutex<Vec<MessagesResponse>>,
        last_user: Mutex<String>,
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn messages(&self, req: MessagesRequest) -> anyhow::Result<MessagesResponse> {
            *self.last_user.lock().unwrap() = req.user;
            let mut resps = self.responses.lock().unwrap();
            if resps.is_empty() {
                anyhow::bail!("no more scripted responses");
            }
            Ok(resps.remove(0))
        }
        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn judge_with(
        responses: Vec<MessagesResponse>,
        root: &std::path::Path,
    ) -> (Judge, Arc<ScriptedClient>) {
        let dir = root.join("judge_prompts");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("v1.txt"), "you are a judge").unwrap();
        let client = Arc::new(ScriptedClient {
            responses: Mutex::new(responses),
            last_user: Mutex::new(String::new()),
        });
        (
            Judge::new(client.clone(), PromptStore::new(root)),
            client,
        )
    }

    fn text_response(text: &str) -> MessagesResponse {
        MessagesResponse {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    #[tokio::test]
    async fn structured_reply_is_parsed() {
        let tmp = tempfile::tempdir().unwrap();
        let (judge, client) = judge_with(
            vec![text_response(r#"{"critique": "solid", "outcome": "pass"}"#)],
            tmp.path(),
        );

        let result = judge
            .judge("desc", "strict", "gt", "{}", "v1")
            .await
            .unwrap();
        assert_eq!(result.outcome, Outcome::Pass);
        assert_eq!(result.critique, "solid");

        let user = client.last_user.lock().unwrap().clone();
        assert!(user.contains("## Scenario\ndesc"));
        assert!(user.contains("## Evaluation Type\nstrict"));
        assert!(user.contains("## Ground Truth\ngt"));
        assert!(user.contains("## Model Response\n{}"));
    }

    #[tokio::test]
    async fn response_without_text_block_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let (judge, _) = judge_with(
            vec![MessagesResponse {
                content: vec![ContentBlock::Other],
            }],
            tmp.path(),
        );

        let err = judge
            .judge("desc", "strict", "gt", "{}", "v1")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EvalError>(),
            Some(EvalError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn missing_prompt_version_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let (judge, _) = judge_with(vec![], tmp.path());
        let err = judge
            .judge("desc", "strict", "gt", "{}", "v7")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EvalError>(),
            Some(EvalError::PromptNotFound(_))
        ));
    }
}
