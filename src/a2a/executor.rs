//! Agent executor interface and the event bus it publishes to.
//!
//! The gateway builds a [`RequestContext`] for every `message/send` call and
//! hands it to an [`AgentExecutor`] together with an [`EventBus`]. The
//! executor publishes its reply and then signals [`AgentExecutionEvent::Finished`].

use crate::a2a::types::Message;
use async_trait::async_trait;
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum A2aError {
    #[error("event bus closed before the agent finished publishing")]
    EventBusClosed,
}

/// Per-invocation input handed to an executor.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub task_id: String,
    pub context_id: String,
    pub user_message: Message,
}

/// Events an executor can publish.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentExecutionEvent {
    Message(Message),
    Finished,
}

/// Channel an executor publishes its events into.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<AgentExecutionEvent>,
}

impl EventBus {
    /// Create a bus and the receiving end the gateway drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AgentExecutionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn publish(&self, message: Message) -> Result<(), A2aError> {
        self.tx
            .send(AgentExecutionEvent::Message(message))
            .map_err(|_| A2aError::EventBusClosed)
    }

    pub fn finished(&self) -> Result<(), A2aError> {
        self.tx
            .send(AgentExecutionEvent::Finished)
            .map_err(|_| A2aError::EventBusClosed)
    }
}

/// Agent business logic entry point.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Produce the reply to `context.user_message` on `event_bus`.
    async fn execute(&self, context: RequestContext, event_bus: &EventBus) -> Result<(), A2aError>;

    /// Cancel an in-progress task.
    async fn cancel_task(&self, task_id: &str, event_bus: &EventBus) -> Result<(), A2aError>;
}
