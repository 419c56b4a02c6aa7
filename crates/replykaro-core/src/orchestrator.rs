use crate::backend::{ChatMessage, CompletionBackend, CompletionRequest};
use crate::errors::Result;
use crate::prompt;
use crate::score::parse_score;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

pub const DRAFT_TEMPERATURE: f32 = 0.7;
pub const DRAFT_MAX_TOKENS: u32 = 350;
pub const EVAL_TEMPERATURE: f32 = 0.0;
pub const EVAL_MAX_TOKENS: u32 = 10;

/// Index-aligned drafts and scores: `scores[i]` rates `replies[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyBundle {
    pub replies: Vec<String>,
    pub scores: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReplyOrchestrator {
    draft_model: String,
    eval_model: String,
}

impl ReplyOrchestrator {
    pub fn new(draft_model: impl Into<String>, eval_model: impl Into<String>) -> Self {
        Self {
            draft_model: draft_model.into(),
            eval_model: eval_model.into(),
        }
    }

    /// Draft `variants` replies in a single completion call, then score each
    /// draft with an independent evaluation call.
    ///
    /// Drafting failure fails the whole request. Evaluation failures are
    /// local: the affected draft scores 0 and every other draft keeps its own
    /// score. The returned sequences are always equal-length and
    /// index-aligned.
    pub async fn generate_replies<B>(
        &self,
        backend: &B,
        message: &str,
        tone: &str,
        goal: &str,
        variants: u32,
    ) -> Result<ReplyBundle>
    where
        B: CompletionBackend + ?Sized,
    {
        let variants = variants.max(1);

        let replies = backend
            .complete(CompletionRequest {
                model: self.draft_model.clone(),
                messages: vec![
                    ChatMessage::system(prompt::DRAFT_SYSTEM_PROMPT),
                    ChatMessage::user(prompt::draft_prompt(message, tone, goal)),
                ],
                temperature: DRAFT_TEMPERATURE,
                max_tokens: DRAFT_MAX_TOKENS,
                n: variants,
            })
            .await?;

        debug!(drafts = replies.len(), "Drafting call completed");

        // Evaluations run concurrently; join_all keeps draft order, not
        // completion order.
        let evaluations = join_all(replies.iter().map(|draft| {
            let request = CompletionRequest {
                model: self.eval_model.clone(),
                messages: vec![
                    ChatMessage::system(prompt::EVAL_SYSTEM_PROMPT),
                    ChatMessage::user(prompt::eval_prompt(draft, goal)),
                ],
                temperature: EVAL_TEMPERATURE,
                max_tokens: EVAL_MAX_TOKENS,
                n: 1,
            };
            async move { backend.complete(request).await }
        }))
        .await;

        let scores = evaluations
            .into_iter()
            .map(|outcome| match outcome {
                Ok(choices) => choices
                    .first()
                    .and_then(|raw| parse_score(raw))
                    .unwrap_or(0),
                Err(err) => {
                    warn!("Draft evaluation failed, scoring 0: {err}");
                    0
                }
            })
            .collect();

        Ok(ReplyBundle { replies, scores })
    }
}
