//! Langdock A2A Agent
//!
//! A minimal Agent-to-Agent (A2A) server. Incoming user messages are
//! forwarded to the Langdock agent completion API using the caller's
//! `X-API-Key`, and the answer is published back as an agent message.

pub mod a2a;
pub mod agent;
pub mod config;
pub mod langdock;
pub mod logging;

#[cfg(test)]
mod tests;

/// Crate version, advertised in the agent card and health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
