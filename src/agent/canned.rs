use crate::a2a::{A2aError, AgentExecutor, EventBus, RequestContext, types::Message};
use async_trait::async_trait;

pub const CANNED_REPLY: &str = "Hello from the A2A agent! The A2A implementation is great.";

/// Replies to every message with a fixed text. Needs no credential and
/// makes no outbound call.
pub struct CannedAgentExecutor {
    reply: String,
}

impl CannedAgentExecutor {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for CannedAgentExecutor {
    fn default() -> Self {
        Self::new(CANNED_REPLY)
    }
}

#[async_trait]
impl AgentExecutor for CannedAgentExecutor {
    async fn execute(&self, context: RequestContext, event_bus: &EventBus) -> Result<(), A2aError> {
        tracing::info!(
            task_id = %context.task_id,
            context_id = %context.context_id,
            "A2A: publishing canned reply"
        );
        event_bus.publish(Message::agent_text(self.reply.clone(), context.context_id))?;
        event_bus.finished()
    }

    async fn cancel_task(&self, _task_id: &str, _event_bus: &EventBus) -> Result<(), A2aError> {
        Ok(())
    }
}
