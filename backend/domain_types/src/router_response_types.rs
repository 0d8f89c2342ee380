use serde::Serialize;

/// The parsed provider response: a flat or nested mapping of field names to values.
pub type ResponseParams = serde_json::Map<String, serde_json::Value>;

/// Raw bytes received from the connector, successful or not.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

/// The caller-facing outcome of one gateway operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GatewayResult {
    pub success: bool,
    pub message: String,
    pub params: ResponseParams,
    pub authorization: Option<String>,
    pub error_code: Option<String>,
    pub test: bool,
    pub avs_result: Option<String>,
    pub cvv_result: Option<String>,
}

impl GatewayResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Looks up a top-level field of the parsed response as a string.
    pub fn param(&self, key: &str) -> Option<String> {
        match self.params.get(key)? {
            serde_json::Value::String(value) => Some(value.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
