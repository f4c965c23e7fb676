//! WebSocket endpoint for the realtime relay

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::tools::{get_tool_definitions, ToolRouter};

use super::events::RelayEvent;

/// Shared state for relay connections
#[derive(Clone)]
pub struct RelayState {
    router: Arc<ToolRouter>,
}

impl RelayState {
    pub fn new(router: Arc<ToolRouter>) -> Self {
        Self { router }
    }
}

/// Build the relay routes
pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/realtime", get(ws_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    })
    .to_string()
}

/// WebSocket upgrade handler
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual relay connection.
///
/// Tool calls are answered in order; a failing call produces an error
/// event scoped to that call and the connection stays up.
async fn handle_socket(mut socket: WebSocket, state: RelayState) {
    let connection_id = Uuid::new_v4().to_string();
    tracing::info!("Relay client connected: {}", connection_id);

    while let Some(Ok(msg)) = socket.recv().await {
        let reply = match msg {
            Message::Text(text) => match serde_json::from_str::<RelayEvent>(&text) {
                Ok(event) => handle_event(&state, event).await,
                Err(e) => Some(RelayEvent::protocol_error(format!("Parse error: {}", e))),
            },
            Message::Close(_) => break,
            _ => None,
        };

        if let Some(reply) = reply {
            let json = match serde_json::to_string(&reply) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode relay event: {}", e);
                    continue;
                }
            };
            if socket.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    }

    tracing::info!("Relay client disconnected: {}", connection_id);
}

async fn handle_event(state: &RelayState, event: RelayEvent) -> Option<RelayEvent> {
    match event {
        RelayEvent::ListTools => Some(RelayEvent::Tools {
            tools: get_tool_definitions(),
        }),
        RelayEvent::ToolCall {
            call_id,
            name,
            arguments,
        } => match state.router.dispatch(&name, arguments).await {
            Ok(result) => Some(RelayEvent::tool_output(call_id, result)),
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "Tool call failed");
                Some(RelayEvent::tool_error(call_id, &e))
            }
        },
        // Output/error/catalog events only ever flow server -> client
        _ => None,
    }
}
