//! Gateway wire protocol types.
//!
//! These are the JSON message shapes a transport-layer gateway exchanges
//! with clients; the gateway itself (the process that owns a socket, an
//! event loop, or a connection pool) is an external collaborator and out of
//! scope here. This module exists so the gateway and the engine agree on
//! one `serde` representation instead of each hand-rolling their own.

use serde::{Deserialize, Serialize};

use crate::catalog::Suggestion;

/// A message sent from a client to the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A complete, finalized piece of input text.
    Submit { session_id: String, text: String },
    /// Incremental text (e.g. the latest keystroke) to append to the
    /// session's buffer.
    Feed { session_id: String, delta: String },
    /// Clear a session's buffer.
    Reset { session_id: String },
    /// Liveness check, correlated by the caller's own timestamp.
    Ping { session_id: String, timestamp: i64 },
}

/// A message sent from the gateway to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Ranked suggestions for a session's current buffer.
    Suggestions {
        session_id: String,
        suggestions: Vec<Suggestion>,
    },
    /// Reply to `Ping`, echoing its timestamp back.
    Pong { timestamp: i64 },
    /// A `MalformedMessage` or other gateway-level failure, never an
    /// internal engine panic — those are logged and never surfaced to a
    /// client as prose.
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn client_message_submit_deserializes_from_tagged_json() {
        let json = r#"{"type":"submit","session_id":"s1","text":"export data"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Submit { session_id, text } => {
                check!(session_id == "s1");
                check!(text == "export data");
            }
            _ => panic!("expected Submit"),
        }
    }

    #[test]
    fn client_message_feed_uses_delta_field() {
        let json = r#"{"type":"feed","session_id":"s1","delta":"cs"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Feed { session_id, delta } => {
                check!(session_id == "s1");
                check!(delta == "cs");
            }
            _ => panic!("expected Feed"),
        }
    }

    #[test]
    fn client_message_ping_carries_session_and_timestamp() {
        let json = r#"{"type":"ping","session_id":"s1","timestamp":1700000000}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Ping { session_id, timestamp } => {
                check!(session_id == "s1");
                check!(timestamp == 1700000000);
            }
            _ => panic!("expected Ping"),
        }
    }

    #[test]
    fn server_message_pong_echoes_timestamp() {
        let msg = ServerMessage::Pong { timestamp: 42 };
        let json = serde_json::to_string(&msg).unwrap();
        check!(json.contains("\"type\":\"pong\""));
        check!(json.contains("42"));
    }

    #[test]
    fn server_message_error_serializes_with_tag() {
        let msg = ServerMessage::Error {
            error: "bad input".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        check!(json.contains("\"type\":\"error\""));
        check!(json.contains("bad input"));
    }
}
