//! Langdock agent completion API client.
//!
//! One POST per call, no retries and no timeout. The caller's API key is
//! sent as a bearer token.

pub mod types;

use crate::a2a::ApiKey;
use types::{AgentPersona, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatPart};
use uuid::Uuid;

/// Default upstream endpoint.
pub const DEFAULT_API_URL: &str = "https://api.langdock.com/agent/v1/chat/completions";

/// Reply used when the upstream answered without any assistant content.
pub const NO_RESPONSE_FALLBACK: &str = "No response from Langdock API";

#[derive(Debug, thiserror::Error)]
pub enum LangdockError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status or an explicit `error` field.
    #[error("{0}")]
    Api(String),

    #[error("invalid response body: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LangdockError>;

#[derive(Debug, Clone)]
pub struct LangdockClient {
    http: reqwest::Client,
    endpoint: String,
    persona: AgentPersona,
}

impl LangdockClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("langdock-a2a-agent/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            persona: AgentPersona::default(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `text` as a single user message and return the reply text.
    ///
    /// A successful response without assistant content yields
    /// [`NO_RESPONSE_FALLBACK`].
    pub async fn complete(&self, api_key: &ApiKey, text: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            agent: &self.persona,
            messages: vec![ChatMessage {
                id: Uuid::new_v4().to_string(),
                role: "user",
                parts: vec![ChatPart { kind: "text", text }],
            }],
            stream: false,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.persona.model,
            "Langdock: sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice::<ChatCompletionResponse>(&bytes);

        tracing::debug!(status = %status, bytes = bytes.len(), "Langdock: response received");

        if !status.is_success() {
            let detail = parsed
                .ok()
                .and_then(|data| data.error_detail().map(str::to_string))
                .unwrap_or_else(|| status_text(status));
            return Err(LangdockError::Api(detail));
        }

        let data = parsed.map_err(LangdockError::InvalidBody)?;
        if let Some(detail) = data.error_detail() {
            return Err(LangdockError::Api(detail.to_string()));
        }

        Ok(data
            .assistant_reply()
            .unwrap_or(NO_RESPONSE_FALLBACK)
            .to_string())
    }
}

/// Reason phrase for `status`, falling back to the numeric code.
fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use rstest::rstest;
    use serde_json::json;

    const PATH: &str = "/agent/v1/chat/completions";

    fn client_for(server: &ServerGuard) -> LangdockClient {
        LangdockClient::new(format!("{}{}", server.url(), PATH)).expect("client")
    }

    #[tokio::test]
    async fn test_sends_bearer_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("authorization", "Bearer sk-test")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "agent": {
                    "name": "A2A Approver",
                    "capabilities": {"webSearch": true},
                    "model": "gpt-5-mini-eu"
                },
                "messages": [{"role": "user", "parts": [{"type": "text", "text": "What is A2A?"}]}],
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"messages":[{"role":"assistant","content":"It's great."}]}"#)
            .create_async()
            .await;

        let reply = client_for(&server)
            .complete(&ApiKey::new("sk-test"), "What is A2A?")
            .await
            .expect("reply");

        mock.assert_async().await;
        assert_eq!(reply, "It's great.");
    }

    #[rstest]
    #[case(500, r#"{"error":"rate limited"}"#, "rate limited")]
    #[case(401, r#"{"error":""}"#, "Unauthorized")]
    #[case(502, "upstream gateway failure", "Bad Gateway")]
    #[case(200, r#"{"error":"quota exceeded","messages":[]}"#, "quota exceeded")]
    #[tokio::test]
    async fn test_upstream_errors(#[case] status: usize, #[case] body: &str, #[case] detail: &str) {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete(&ApiKey::new("sk-test"), "hi")
            .await
            .expect_err("should fail");

        assert!(matches!(err, LangdockError::Api(_)));
        assert_eq!(err.to_string(), detail);
    }

    #[rstest]
    #[case(r#"{"messages":[]}"#)]
    #[case(r#"{}"#)]
    #[case(r#"{"messages":[{"role":"user","content":"echo"}]}"#)]
    #[case(r#"{"messages":[{"role":"assistant"}]}"#)]
    #[tokio::test]
    async fn test_empty_reply_uses_fallback(#[case] body: &str) {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let reply = client_for(&server)
            .complete(&ApiKey::new("sk-test"), "hi")
            .await
            .expect("reply");

        assert_eq!(reply, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_invalid_success_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .complete(&ApiKey::new("sk-test"), "hi")
            .await
            .expect_err("should fail");

        assert!(matches!(err, LangdockError::InvalidBody(_)));
        assert!(err.to_string().starts_with("invalid response body: "));
    }

    #[tokio::test]
    async fn test_reply_after_entry_without_role() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"messages":[{"type":"tool"},{"role":"assistant","content":"ok"}]}"#)
            .create_async()
            .await;

        let reply = client_for(&server)
            .complete(&ApiKey::new("sk-test"), "hi")
            .await
            .expect("reply");

        assert_eq!(reply, "ok");
    }

    #[tokio::test]
    async fn test_non_string_content_is_invalid_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"messages":[{"role":"assistant","content":[{"type":"text","text":"hi"}]}]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .complete(&ApiKey::new("sk-test"), "hi")
            .await
            .expect_err("should fail");

        assert!(matches!(err, LangdockError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = LangdockClient::new("http://127.0.0.1:1/agent/v1/chat/completions")
            .expect("client");
        let err = client
            .complete(&ApiKey::new("sk-test"), "hi")
            .await
            .expect_err("should fail");
        assert!(matches!(err, LangdockError::Transport(_)));
    }
}
