use common_utils::{request::Request, CustomResult};
use domain_types::{errors::ApiClientError, router_response_types::Response};

/// Issues one HTTP call per request.
///
/// `Ok(Ok(_))` carries a 2xx/3xx body and `Ok(Err(_))` a 4xx/5xx body, recovered in full.
/// `Err(_)` means no body could be obtained at all.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn call_connector_api(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError>;
}
