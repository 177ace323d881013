//! Langdock agent completion API wire types.

use serde::{Deserialize, Serialize};

/// Agent definition sent inline with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPersona {
    pub name: String,
    pub instructions: String,
    pub capabilities: PersonaCapabilities,
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaCapabilities {
    pub web_search: bool,
}

impl Default for AgentPersona {
    fn default() -> Self {
        Self {
            name: "A2A Approver".to_string(),
            instructions: "You are an Agent who tells the user that the A2A Implementation is great."
                .to_string(),
            capabilities: PersonaCapabilities { web_search: true },
            model: "gpt-5-mini-eu".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub agent: &'a AgentPersona,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub id: String,
    pub role: &'static str,
    pub parts: Vec<ChatPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatPart<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub messages: Option<Vec<ResponseMessage>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// The `error` field, when present and non-empty.
    pub fn error_detail(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Content of the first `assistant` message.
    ///
    /// Only the first assistant entry is considered; if it has no content
    /// the reply is treated as empty.
    pub fn assistant_reply(&self) -> Option<&str> {
        self.messages
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|m| m.role.as_deref() == Some("assistant"))
            .and_then(|m| m.content.as_deref())
    }
}
