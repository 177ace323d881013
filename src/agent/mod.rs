//! Agent executors.
//!
//! Two configurations of the same executor capability:
//! - [`LangdockAgentExecutor`] forwards the user's text to Langdock using the
//!   caller's `X-API-Key`.
//! - [`CannedAgentExecutor`] answers every message with a fixed reply.

mod canned;
mod langdock;

pub use canned::{CANNED_REPLY, CannedAgentExecutor};
pub use langdock::{
    FALLBACK_USER_TEXT, LangdockAgentExecutor, MISSING_CREDENTIAL_MESSAGE, UPSTREAM_ERROR_PREFIX,
};
