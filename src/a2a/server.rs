//! A2A Gateway HTTP server powered by axum.
//!
//! Serves:
//! - `GET  /.well-known/agent-card.json` — Agent Card discovery
//! - `GET  /.well-known/agent.json`      — Agent Card (legacy path)
//! - `POST /`                            — JSON-RPC 2.0 endpoint
//! - `GET  /health`                      — Health check

use crate::a2a::{agent_card, executor::AgentExecutor, handler, middleware, types::*};
use crate::agent::{CannedAgentExecutor, LangdockAgentExecutor};
use crate::config::{AgentMode, PORT, Settings};
use crate::langdock::LangdockClient;
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for the A2A gateway.
#[derive(Clone)]
pub struct A2aState {
    pub card: Arc<AgentCard>,
    pub executor: Arc<dyn AgentExecutor>,
}

impl A2aState {
    /// Build the card and the executor selected by `settings.agent_mode`.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let executor: Arc<dyn AgentExecutor> = match settings.agent_mode {
            AgentMode::Langdock => {
                let client = LangdockClient::new(settings.langdock_api_url.as_str())?;
                tracing::info!("Langdock endpoint: {}", client.endpoint());
                Arc::new(LangdockAgentExecutor::new(client))
            }
            AgentMode::Canned => Arc::new(CannedAgentExecutor::default()),
        };

        Ok(Self {
            card: Arc::new(agent_card::build_agent_card(
                &settings.agent_url,
                settings.agent_mode,
            )),
            executor,
        })
    }
}

/// Build the axum router for the A2A gateway.
pub fn build_router(state: A2aState) -> Router {
    Router::new()
        .route("/.well-known/agent-card.json", get(get_agent_card))
        .route("/.well-known/agent.json", get(get_agent_card))
        .route("/", post(handle_jsonrpc))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(middleware::MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(middleware::request_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the A2A gateway server on the fixed port.
pub async fn start_server(settings: &Settings) -> anyhow::Result<()> {
    let state = A2aState::from_settings(settings)?;
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], PORT));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 Server started on http://localhost:{}", PORT);
    tracing::info!(
        "Enter the following URL in Langdock: {}/.well-known/agent-card.json",
        settings.agent_url
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /.well-known/agent-card.json — Agent Card discovery.
async fn get_agent_card(State(state): State<A2aState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

/// POST / — JSON-RPC 2.0 endpoint.
async fn handle_jsonrpc(
    State(state): State<A2aState>,
    body: Bytes,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                )),
            );
        }
    };

    // Well-formed JSON that is not a request object is an invalid request.
    let id = value.get("id").cloned().unwrap_or_default();
    let req: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(req) => req,
        Err(e) => {
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                )),
            );
        }
    };

    let response = handler::dispatch(req, state.executor.as_ref()).await;
    (StatusCode::OK, Json(response))
}

/// GET /health — Health check.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "protocol": "A2A",
        "protocol_version": PROTOCOL_VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state(mode: AgentMode) -> A2aState {
        let settings = Settings {
            agent_url: "http://127.0.0.1:3333".to_string(),
            agent_mode: mode,
            langdock_api_url: "http://127.0.0.1:1/agent/v1/chat/completions".to_string(),
        };
        A2aState::from_settings(&settings).expect("state")
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state(AgentMode::Langdock));
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request");

        let resp = app.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_agent_card_endpoint() {
        for path in ["/.well-known/agent-card.json", "/.well-known/agent.json"] {
            let app = build_router(test_state(AgentMode::Langdock));
            let req = Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request");

            let resp = app.oneshot(req).await.expect("response");
            assert_eq!(resp.status(), StatusCode::OK);
            let card = json_body(resp).await;
            assert_eq!(card["name"], "Langdock A2A Agent");
            assert_eq!(card["url"], "http://127.0.0.1:3333");
        }
    }

    #[tokio::test]
    async fn test_jsonrpc_send_message() {
        let app = build_router(test_state(AgentMode::Canned));
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "message/send",
            "params": {
                "message": {
                    "kind": "message",
                    "messageId": "m-1",
                    "role": "user",
                    "parts": [{"kind": "text", "text": "Hello from A2A test!"}]
                }
            },
            "id": 1
        });

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).expect("json")))
            .expect("request");

        let resp = app.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["result"]["parts"][0]["text"], crate::agent::CANNED_REPLY);
    }

    #[tokio::test]
    async fn test_jsonrpc_parse_error() {
        let app = build_router(test_state(AgentMode::Canned));
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("request");

        let resp = app.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["error"]["code"], -32700);
        assert_eq!(json["id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_jsonrpc_missing_method_is_invalid_request() {
        let app = build_router(test_state(AgentMode::Canned));
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"jsonrpc":"2.0","id":1}"#))
            .expect("request");

        let resp = app.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["error"]["code"], -32600);
        assert_eq!(json["id"], 1);
    }

    fn send_message_body(text: &str) -> Body {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "message/send",
            "params": {
                "message": {
                    "kind": "message",
                    "messageId": "m-1",
                    "role": "user",
                    "parts": [{"kind": "text", "text": text}]
                }
            },
            "id": 7
        });
        Body::from(serde_json::to_string(&body).expect("json"))
    }

    #[tokio::test]
    async fn test_body_under_limit_is_accepted() {
        let app = build_router(test_state(AgentMode::Canned));
        let text = "a".repeat(3 * 1024 * 1024);
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(send_message_body(&text))
            .expect("request");

        let resp = app.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["result"]["parts"][0]["text"], crate::agent::CANNED_REPLY);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_rejected() {
        let app = build_router(test_state(AgentMode::Canned));
        let text = "a".repeat(middleware::MAX_BODY_BYTES + 1);
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(send_message_body(&text))
            .expect("request");

        let resp = app.oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
