//! A2A (Agent-to-Agent) Protocol gateway.
//!
//! Implements the slice of the A2A 0.3 protocol this agent needs:
//! - Agent Card discovery (`.well-known/agent-card.json`)
//! - JSON-RPC 2.0 `message/send`
//! - Request-scoped credential propagation from the `X-API-Key` header
//! - HTTP gateway server (axum)

pub mod agent_card;
pub mod credential;
pub mod executor;
pub mod handler;
pub mod middleware;
pub mod server;
pub mod types;

pub use credential::{ApiKey, current_credential, with_credential};
pub use executor::{A2aError, AgentExecutionEvent, AgentExecutor, EventBus, RequestContext};
pub use server::start_server;
