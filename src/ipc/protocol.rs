//! JSON-RPC 2.0 envelope types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version string sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request with positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Build a request. A `Value::Null` params is omitted from the wire.
    pub fn new(method: &str, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params: match params {
                Value::Null => None,
                other => Some(other),
            },
            id,
        }
    }
}

/// Error object carried by a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC 2.0 response. Exactly one of `result` / `error` is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Keeps `"result": null` as `Some(Value::Null)` so a present-but-null
/// result is not mistaken for a missing one.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_without_params() {
        let request = JsonRpcRequest::new("GetProjectName", Value::Null, 1);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "method": "GetProjectName", "id": 1})
        );
    }

    #[test]
    fn test_request_with_positional_params() {
        let request = JsonRpcRequest::new("InsertLoopIntoBody", json!(["b-1", "l-2"]), 7);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "method": "InsertLoopIntoBody",
                "params": ["b-1", "l-2"],
                "id": 7
            })
        );
    }

    #[test]
    fn test_response_success() {
        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","result":"abc","id":1}"#).unwrap();
        assert_eq!(response.result, Some(json!("abc")));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_response_null_result_is_present() {
        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","result":null,"id":1}"#).unwrap();
        assert_eq!(response.result, Some(Value::Null));

        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert_eq!(response.result, None);
    }

    #[test]
    fn test_response_error() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":3}"#,
        )
        .unwrap();
        let err = response.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found");
        assert_eq!(err.data, None);
    }
}
