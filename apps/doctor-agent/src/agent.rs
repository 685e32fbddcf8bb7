//! Tool-use loop over the Messages API.

use std::sync::Arc;

use doctor_tool_core::providers::anthropic::render_registry;
use doctor_tool_core::{ToolContext, ToolRegistry};
use serde_json::Value;

use crate::anthropic::{
    ContentBlockParam, MessageParam, MessageRole, MessagesClient, MessagesRequest,
};
use crate::error::AgentError;
use crate::instructions::system_prompt;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_MAX_ITERATIONS: usize = 8;

/// A conversation with the doctor finder.
///
/// History is kept across turns so follow-up questions can refer to earlier
/// results. A failed turn leaves the history as it was before the turn.
pub struct DoctorAgent {
    client: MessagesClient,
    registry: Arc<ToolRegistry>,
    tools: Vec<Value>,
    system: String,
    model: String,
    max_tokens: u32,
    max_iterations: usize,
    history: Vec<MessageParam>,
}

impl DoctorAgent {
    #[must_use]
    pub fn new(client: MessagesClient, registry: Arc<ToolRegistry>) -> Self {
        let tools = render_registry(&registry, false);
        Self {
            client,
            registry,
            tools,
            system: system_prompt(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n.max(1);
        self
    }

    #[must_use]
    pub fn history(&self) -> &[MessageParam] {
        &self.history
    }

    /// Answer one user message, running tools until the model stops asking.
    pub async fn run_turn(&mut self, input: &str) -> Result<String, AgentError> {
        let checkpoint = self.history.len();
        let result = self.turn_inner(input).await;
        if result.is_err() {
            self.history.truncate(checkpoint);
        }
        result
    }

    async fn turn_inner(&mut self, input: &str) -> Result<String, AgentError> {
        self.history.push(MessageParam::user(input));

        for round in 0..self.max_iterations {
            let req = MessagesRequest {
                model: self.model.clone(),
                max_tokens: self.max_tokens,
                system: Some(self.system.clone()),
                messages: self.history.clone(),
                tools: self.tools.clone(),
            };
            let resp = self.client.create(&req).await?;
            tracing::debug!(round, stop_reason = ?resp.stop_reason, "model responded");

            let uses: Vec<(String, String, Value)> = resp
                .tool_uses()
                .into_iter()
                .map(|(id, name, input)| (id.to_string(), name.to_string(), input.clone()))
                .collect();
            let text = resp.text();
            if uses.is_empty() && text.trim().is_empty() {
                return Err(AgentError::EmptyReply);
            }

            // The API rejects empty text blocks when history is replayed.
            let replay: Vec<ContentBlockParam> = resp
                .content
                .into_iter()
                .filter_map(crate::anthropic::ContentBlock::into_param)
                .filter(|b| {
                    !matches!(b, ContentBlockParam::Text { text } if text.trim().is_empty())
                })
                .collect();
            self.history
                .push(MessageParam::blocks(MessageRole::Assistant, replay));

            if uses.is_empty() {
                return Ok(text);
            }

            let mut results = Vec::with_capacity(uses.len());
            for (id, name, input) in uses {
                results.push(self.run_tool(id, &name, input).await);
            }
            self.history
                .push(MessageParam::blocks(MessageRole::User, results));
        }

        Err(AgentError::MaxIterations(self.max_iterations))
    }

    async fn run_tool(&self, tool_use_id: String, name: &str, input: Value) -> ContentBlockParam {
        tracing::info!(tool = name, "running tool");
        let ctx = ToolContext::for_host("agent");
        match self.registry.dispatch_json(name, input, &ctx).await {
            Ok(data) => ContentBlockParam::ToolResult {
                tool_use_id,
                content: serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
                is_error: None,
            },
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool failed");
                ContentBlockParam::ToolResult {
                    tool_use_id,
                    content: e.message(),
                    is_error: Some(true),
                }
            }
        }
    }
}
