//! Wire frame types for the toolbus protocol.
//!
//! Each frame is one JSON text message on the WebSocket. Inbound frames are
//! parsed into [`ClientRequest`]; outbound frames are one of the
//! [`ServerFrame`] variants, tagged by a `type` discriminator.
//!
//! `ClientRequest` deliberately keeps `type` as a plain string rather than an
//! enum: a request with an unrecognized type must still parse so the
//! dispatcher can answer it with an error frame naming the type, instead of
//! conflating it with a malformed frame.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single inbound request frame.
///
/// Only `type` is always present; the other fields are required or ignored
/// depending on the request type (validated by the dispatcher, not serde).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRequest {
    /// Request type: "message", "tool", "list_tools", or anything else
    /// (answered with an error frame).
    #[serde(rename = "type")]
    pub kind: String,

    /// Tool name, for "tool" requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Tool parameters, for "tool" requests. An empty mapping is valid;
    /// an absent field is not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,

    /// Chat text, for "message" requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A single outbound frame, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Response to "list_tools": every registered tool's descriptor.
    ToolsList { tools: Vec<ToolDescriptor> },
    /// Acknowledgement of a "message" request.
    Message { message: String },
    /// Successful tool invocation result.
    ToolResult {
        tool: String,
        result: Map<String, Value>,
    },
    /// Protocol or tool execution failure. The connection stays open.
    Error { message: String },
}

/// Projection of a registered tool for "tools_list" responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

/// A declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    /// Declared type label (e.g. "string", "number"). Not enforced by the
    /// registry; tools validate their own inputs.
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl ToolParameter {
    /// Construct a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_request_full_parse() {
        let raw = r#"{"type":"tool","tool":"echo","parameters":{"message":"hi"}}"#;
        let req: ClientRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.kind, "tool");
        assert_eq!(req.tool.as_deref(), Some("echo"));
        assert_eq!(
            req.parameters.unwrap().get("message"),
            Some(&json!("hi"))
        );
        assert!(req.message.is_none());
    }

    #[test]
    fn test_client_request_unknown_type_still_parses() {
        // Unknown types must reach the dispatcher, not fail deserialization.
        let req: ClientRequest = serde_json::from_str(r#"{"type":"subscribe"}"#).unwrap();
        assert_eq!(req.kind, "subscribe");
        assert!(req.tool.is_none());
        assert!(req.parameters.is_none());
    }

    #[test]
    fn test_client_request_empty_parameters_distinct_from_absent() {
        let with_empty: ClientRequest =
            serde_json::from_str(r#"{"type":"tool","tool":"get_time","parameters":{}}"#).unwrap();
        assert!(with_empty.parameters.is_some());

        let absent: ClientRequest =
            serde_json::from_str(r#"{"type":"tool","tool":"get_time"}"#).unwrap();
        assert!(absent.parameters.is_none());
    }

    #[test]
    fn test_server_frame_tags() {
        let error = ServerFrame::Error {
            message: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"type": "error", "message": "boom"})
        );

        let message = ServerFrame::Message {
            message: "Received: hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"type": "message", "message": "Received: hi"})
        );
    }

    #[test]
    fn test_tool_result_frame_shape() {
        let mut result = Map::new();
        result.insert("result".to_string(), json!(8.0));
        let frame = ServerFrame::ToolResult {
            tool: "calculate".to_string(),
            result,
        };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({"type": "tool_result", "tool": "calculate", "result": {"result": 8.0}})
        );
    }

    #[test]
    fn test_tools_list_frame_shape() {
        let frame = ServerFrame::ToolsList {
            tools: vec![ToolDescriptor {
                name: "echo".to_string(),
                description: "Echoes back the input message".to_string(),
                parameters: vec![ToolParameter::required(
                    "message",
                    "string",
                    "Message to echo back",
                )],
            }],
        };
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["type"], "tools_list");
        // The declared type label serializes under the wire name "type".
        assert_eq!(value["tools"][0]["parameters"][0]["type"], "string");
        assert_eq!(value["tools"][0]["parameters"][0]["required"], true);
    }

    #[test]
    fn test_tool_parameter_required_defaults_true() {
        let param: ToolParameter = serde_json::from_str(
            r#"{"name":"a","type":"number","description":"First number"}"#,
        )
        .unwrap();
        assert!(param.required);
    }
}
