use serde::{Deserialize, Serialize};

use crate::Message;

/// The named pipe path used between the CLI (or a launcher) and the host.
pub const PIPE_NAME: &str = r"\\.\pipe\winrelay";

/// A request sent to the host.
///
/// Serialized as one line of JSON per pipe connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// Restore the window and shut the host down.
    Stop,
    /// Report whether a window is attached and its cached geometry.
    Status,
    /// Deliver one window message to the controller.
    Relay { message: Message },
}

/// A response sent from the host back to the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Whether the request was accepted.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status of a host response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: Some(message.into()),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn relay_wraps_message_under_command_tag() {
        // Arrange
        let command = Command::Relay {
            message: Message::new("SetWindow", Some(json!({ "x": 1 }))),
        };

        // Act
        let value = serde_json::to_value(&command).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({
                "command": "Relay",
                "message": { "command": "SetWindow", "data": { "x": 1 } }
            })
        );
    }

    #[test]
    fn unit_commands_parse_from_tag_only() {
        let command: Command = serde_json::from_str(r#"{"command":"Stop"}"#).unwrap();

        assert_eq!(command, Command::Stop);
    }

    #[test]
    fn ok_response_omits_message() {
        let json = serde_json::to_string(&Response::ok()).unwrap();

        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
