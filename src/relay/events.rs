//! Relay event types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WayfarerError;
use crate::tools::ToolDefinition;
use crate::types::{ToolDirection, ToolResult};

/// Events exchanged over the relay socket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayEvent {
    /// Session asks for the tool catalog
    ListTools,
    /// Tool catalog answer
    Tools { tools: Vec<ToolDefinition> },
    /// A named tool invocation from the session
    ToolCall {
        call_id: String,
        name: String,
        #[serde(default)]
        arguments: Value,
    },
    /// Direction-tagged result for a call
    ToolOutput {
        call_id: String,
        direction: ToolDirection,
        payload: Value,
    },
    /// Per-call failure; the connection stays up
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        call_id: Option<String>,
        code: i64,
        message: String,
    },
}

impl RelayEvent {
    /// Wrap a tool result for a call
    pub fn tool_output(call_id: String, result: ToolResult) -> Self {
        RelayEvent::ToolOutput {
            call_id,
            direction: result.direction,
            payload: result.payload,
        }
    }

    /// Wrap a tool failure for a call
    pub fn tool_error(call_id: String, error: &WayfarerError) -> Self {
        RelayEvent::Error {
            call_id: Some(call_id),
            code: error.code(),
            message: error.to_string(),
        }
    }

    /// A protocol-level failure not tied to any call
    pub fn protocol_error(message: impl Into<String>) -> Self {
        RelayEvent::Error {
            call_id: None,
            code: -32700,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_deserialization() {
        let event: RelayEvent = serde_json::from_str(
            r#"{"type": "tool_call", "call_id": "c1", "name": "search", "arguments": {"query": "praia"}}"#,
        )
        .unwrap();

        match event {
            RelayEvent::ToolCall { call_id, name, arguments } => {
                assert_eq!(call_id, "c1");
                assert_eq!(name, "search");
                assert_eq!(arguments["query"], "praia");
            }
            other => panic!("wrong event: {:?}", other),
        }
    }

    #[test]
    fn test_tool_output_serialization() {
        let event = RelayEvent::tool_output(
            "c1".to_string(),
            ToolResult::server_text("[A]: x\n-----\n"),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tool_output");
        assert_eq!(json["direction"], "to_server");
        assert_eq!(json["call_id"], "c1");
    }

    #[test]
    fn test_error_event_omits_missing_call_id() {
        let json = serde_json::to_value(RelayEvent::protocol_error("bad frame")).unwrap();
        assert!(json.get("call_id").is_none());
        assert_eq!(json["code"], -32700);
    }
}
