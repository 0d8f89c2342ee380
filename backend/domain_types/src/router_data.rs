use common_utils::consts;
use hyperswitch_masking::Secret;

pub type Error = error_stack::Report<crate::errors::ConnectorError>;

#[derive(Default, Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    SignatureKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
    },
    #[default]
    NoKey,
}

/// A connector-reported failure, classified into a message and an error code.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
    pub status_code: u16,
    pub connector_transaction_id: Option<String>,
    pub avs_result: Option<String>,
    pub cvv_result: Option<String>,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self {
            code: consts::NO_ERROR_CODE.to_string(),
            message: consts::NO_ERROR_MESSAGE.to_string(),
            reason: None,
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            connector_transaction_id: None,
            avs_result: None,
            cvv_result: None,
        }
    }
}
