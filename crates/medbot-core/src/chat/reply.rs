//! Reply service: one user message in, one cleaned model answer out.

use tracing::{debug, info, warn};

use medbot_types::config::LlmConfig;
use medbot_types::llm::{CompletionRequest, LlmError, Message};

use super::answer::AnswerCleaner;
use super::history::ConversationHistory;
use crate::llm::box_provider::BoxLlmProvider;
use crate::retrieval::box_retriever::BoxRetriever;
use crate::retrieval::context::{fill_context, join_chunks};

/// Model parameters sent with every completion.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    pub system_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl From<&LlmConfig> for ReplySettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Produces answers for the `/get` endpoint.
pub struct ReplyService {
    provider: BoxLlmProvider,
    cleaner: AnswerCleaner,
    settings: ReplySettings,
    retriever: Option<BoxRetriever>,
    top_k: usize,
}

impl ReplyService {
    pub fn new(provider: BoxLlmProvider, cleaner: AnswerCleaner, settings: ReplySettings) -> Self {
        Self {
            provider,
            cleaner,
            settings,
            retriever: None,
            top_k: 0,
        }
    }

    /// Ground answers in the `top_k` document chunks closest to the transcript.
    pub fn with_retriever(mut self, retriever: BoxRetriever, top_k: usize) -> Self {
        self.retriever = Some(retriever);
        self.top_k = top_k;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn has_retriever(&self) -> bool {
        self.retriever.is_some()
    }

    /// Completion request carrying the transcript prompt as one user message
    /// and `context` in the system prompt.
    pub fn build_request(&self, prompt: String, context: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::user(prompt)],
            system: Some(fill_context(&self.settings.system_prompt, context)),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }

    /// Document text for `prompt`, empty without a retriever or on lookup failure.
    async fn context_for(&self, prompt: &str) -> String {
        let Some(retriever) = &self.retriever else {
            return String::new();
        };
        match retriever.retrieve(prompt, self.top_k).await {
            Ok(chunks) => {
                debug!(chunks = chunks.len(), "context retrieved");
                join_chunks(&chunks)
            }
            Err(e) => {
                warn!(error = %e, "context lookup failed, answering without it");
                String::new()
            }
        }
    }

    /// Send a tiny completion to confirm the provider accepts our key.
    pub async fn check_connection(&self) -> Result<(), LlmError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::user("Hello")],
            system: None,
            max_tokens: 10,
            temperature: Some(0.0),
        };
        self.provider.complete(&request).await?;
        Ok(())
    }

    /// Record `msg`, look up context, ask the model, clean and record the answer.
    ///
    /// On failure the user line stays in the history and no bot line is added.
    pub async fn reply(
        &self,
        history: &mut ConversationHistory,
        msg: &str,
    ) -> Result<String, LlmError> {
        history.push_user(msg);
        let prompt = history.prompt();
        let context = self.context_for(&prompt).await;
        let request = self.build_request(prompt, &context);
        debug!(provider = self.provider.name(), lines = history.len(), "requesting completion");

        let response = self.provider.complete(&request).await?;
        let answer = self.cleaner.clean(&response.content);
        info!(response_id = %response.id, chars = answer.len(), "answer ready");

        history.push_bot(&answer);
        debug!(turn = history.turn_count(), "turn recorded");
        Ok(answer)
    }
}
