use crate::a2a::{
    A2aError, AgentExecutor, EventBus, RequestContext, current_credential, types::Message,
};
use crate::langdock::LangdockClient;
use async_trait::async_trait;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Error: X-API-Key header is required";

/// Text forwarded upstream when the user message has no text part.
pub const FALLBACK_USER_TEXT: &str = "Hello";

pub const UPSTREAM_ERROR_PREFIX: &str = "Langdock API error: ";

/// Forwards each user message to the Langdock agent API.
///
/// Upstream failures never surface as executor errors: every path publishes
/// exactly one agent message and then signals finished.
pub struct LangdockAgentExecutor {
    client: LangdockClient,
}

impl LangdockAgentExecutor {
    pub fn new(client: LangdockClient) -> Self {
        Self { client }
    }

    async fn reply_text(&self, context: &RequestContext) -> String {
        let Some(api_key) = current_credential() else {
            tracing::warn!(
                context_id = %context.context_id,
                "A2A: request without X-API-Key, replying with error"
            );
            return MISSING_CREDENTIAL_MESSAGE.to_string();
        };

        let user_text = context
            .user_message
            .first_text()
            .unwrap_or(FALLBACK_USER_TEXT);

        match self.client.complete(&api_key, user_text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(context_id = %context.context_id, "Langdock call failed: {}", e);
                format!("{}{}", UPSTREAM_ERROR_PREFIX, e)
            }
        }
    }
}

#[async_trait]
impl AgentExecutor for LangdockAgentExecutor {
    async fn execute(&self, context: RequestContext, event_bus: &EventBus) -> Result<(), A2aError> {
        let text = self.reply_text(&context).await;

        tracing::info!(
            task_id = %context.task_id,
            context_id = %context.context_id,
            "A2A: publishing reply ({} chars)",
            text.chars().count()
        );

        event_bus.publish(Message::agent_text(text, context.context_id))?;
        event_bus.finished()
    }

    async fn cancel_task(&self, task_id: &str, _event_bus: &EventBus) -> Result<(), A2aError> {
        tracing::debug!("A2A: cancel requested for task {}, nothing to interrupt", task_id);
        Ok(())
    }
}
