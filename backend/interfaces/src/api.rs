use common_utils::CustomResult;
use domain_types::{errors, router_data::ConnectorAuthType, types::Connectors};
use hyperswitch_masking::Maskable;

/// The trait that provides the common
pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP header used for authorization.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(Vec::new())
    }

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API, picked by the test-mode flag.
    fn base_url<'a>(&self, connectors: &'a Connectors, test_mode: bool) -> &'a str;
}
