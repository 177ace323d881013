//! JSON-RPC 2.0 handler for A2A protocol operations.
//!
//! Dispatches JSON-RPC methods:
//! - `message/send` → run the agent executor, return its reply message
//! - `tasks/get`, `tasks/cancel` → always "task not found" (replies are
//!   plain messages, no task is ever stored)
//! - streaming and push-notification methods → unsupported

use crate::a2a::executor::{AgentExecutionEvent, AgentExecutor, EventBus, RequestContext};
use crate::a2a::types::*;
use uuid::Uuid;

/// Dispatch a JSON-RPC request to the appropriate handler.
pub async fn dispatch(req: JsonRpcRequest, executor: &dyn AgentExecutor) -> JsonRpcResponse {
    if req.jsonrpc != "2.0" {
        return JsonRpcResponse::error(
            req.id,
            error_codes::INVALID_REQUEST,
            "Invalid JSON-RPC version, expected 2.0",
        );
    }

    match req.method.as_str() {
        "message/send" => handle_send_message(req.id, req.params, executor).await,
        "tasks/get" | "tasks/cancel" => handle_task_lookup(req.id, req.params),
        "message/stream"
        | "tasks/resubscribe"
        | "tasks/pushNotificationConfig/set"
        | "tasks/pushNotificationConfig/get"
        | "tasks/pushNotificationConfig/list"
        | "tasks/pushNotificationConfig/delete" => JsonRpcResponse::error(
            req.id,
            error_codes::UNSUPPORTED_OPERATION,
            format!("Unsupported operation: {}", req.method),
        ),
        _ => JsonRpcResponse::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    }
}

/// Handle `message/send` — run the executor and return the message it published.
async fn handle_send_message(
    id: serde_json::Value,
    params: serde_json::Value,
    executor: &dyn AgentExecutor,
) -> JsonRpcResponse {
    let send_params: MessageSendParams = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e),
            );
        }
    };

    let task_id = send_params
        .message
        .task_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let context_id = send_params
        .message
        .context_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::info!(
        "A2A: message/send task={} context={} parts={}",
        task_id,
        context_id,
        send_params.message.parts.len()
    );

    let context = RequestContext {
        task_id,
        context_id,
        user_message: send_params.message,
    };

    // Runs inline so the request-scoped credential stays visible.
    let (bus, mut events) = EventBus::channel();
    if let Err(e) = executor.execute(context, &bus).await {
        tracing::error!("A2A: executor failed: {}", e);
        return JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string());
    }
    drop(bus);

    let mut reply = None;
    let mut finished = false;
    while let Some(event) = events.recv().await {
        match event {
            AgentExecutionEvent::Message(msg) if reply.is_none() => reply = Some(msg),
            AgentExecutionEvent::Message(msg) => {
                tracing::warn!("A2A: dropping extra message {}", msg.message_id);
            }
            AgentExecutionEvent::Finished => finished = true,
        }
    }

    match reply {
        Some(msg) if finished => match serde_json::to_value(&msg) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize reply: {}", e),
            ),
        },
        Some(_) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            "Agent did not signal completion",
        ),
        None => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            "Agent finished without publishing a reply",
        ),
    }
}

/// Handle `tasks/get` and `tasks/cancel`.
fn handle_task_lookup(id: serde_json::Value, params: serde_json::Value) -> JsonRpcResponse {
    let Some(task_id) = params.get("id").and_then(|v| v.as_str()) else {
        return JsonRpcResponse::error(
            id,
            error_codes::INVALID_PARAMS,
            "Invalid params: missing task id",
        );
    };

    JsonRpcResponse::error(
        id,
        error_codes::TASK_NOT_FOUND,
        format!("Task not found: {}", task_id),
    )
}
