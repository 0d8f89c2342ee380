use std::{fmt::Write as _, str::FromStr, time::Duration};

use common_utils::{
    request::{Method, Request, RequestContent},
    CustomResult,
};
use domain_types::{
    errors::{ApiClientError, ConnectorError},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ExposeInterface, Maskable};
use interfaces::{
    connector_integration_v2::BoxedConnectorIntegrationV2, transport::ConnectorTransport,
};
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

const MASKED_HEADER_VALUE: &str = "*** alloc::string::String ***";

/// Builds the connector request, sends it through `transport`, and hands whatever body comes
/// back to the connector for classification.
///
/// Only a call that produced no body at all fails here; provider declines and 4xx/5xx payloads
/// come back as a completed router data.
#[tracing::instrument(
    name = "connector_processing_step",
    skip_all,
    fields(
        connector = connector.id(),
        request.url = Empty,
        request.method = Empty,
        request.headers = Empty,
        request.body = Empty,
        response.status_code = Empty,
        response.error_message = Empty,
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<F, ResourceCommonData, Req, Resp>(
    transport: &dyn ConnectorTransport,
    connector: BoxedConnectorIntegrationV2<'static, F, ResourceCommonData, Req, Resp>,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
where
    F: Clone + 'static,
    ResourceCommonData: Clone + 'static,
    Req: Clone + std::fmt::Debug + 'static,
    Resp: Clone + std::fmt::Debug + 'static,
{
    let start = tokio::time::Instant::now();
    let connector_request = connector.build_request_v2(&router_data)?;

    let Some(request) = connector_request else {
        return Ok(router_data);
    };

    let headers_for_logging = masked_headers(&request.headers);
    tracing::Span::current().record(
        "request.headers",
        tracing::field::display(&headers_for_logging),
    );

    let masked_request = match request.body.as_ref() {
        Some(RequestContent::Json(i)) => (**i)
            .masked_serialize()
            .unwrap_or(json!({ "error": "failed to mask serialize connector request"})),
        Some(RequestContent::Xml(i)) => Value::String(connector.scrub(i)),
        Some(RequestContent::RawBytes(_)) => json!({"request_type": "RAW_BYTES"}),
        None => Value::Null,
    };
    tracing::Span::current().record("request.body", tracing::field::display(&masked_request));

    let url = request.url.clone();
    let method = request.method;
    tracing::Span::current().record("request.url", tracing::field::display(&url));
    tracing::Span::current().record("request.method", tracing::field::display(method));

    let request_transcript = connector
        .supports_scrubbing()
        .then(|| request_transcript(&request));

    let response = transport.call_connector_api(request).await;

    let result = match response {
        Ok(body) => {
            let body = match body {
                Ok(body) => body,
                Err(body) => {
                    tracing::warn!(
                        status_code = body.status_code,
                        "connector responded with an error status"
                    );
                    body
                }
            };
            tracing::Span::current().record(
                "response.status_code",
                tracing::field::display(body.status_code),
            );

            if let Some(transcript) = request_transcript {
                let transcript = transcript + &response_transcript(&body);
                tracing::debug!(transcript = %connector.scrub(&transcript), "connector transcript");
            }

            let handled = if (200..300).contains(&body.status_code) {
                connector.handle_response_v2(&router_data, body)
            } else {
                connector.get_error_response_v2(&router_data, body)
            }?;

            if let Err(error) = handled.response.as_ref() {
                tracing::Span::current().record(
                    "response.error_message",
                    tracing::field::display(&error.message),
                );
            }
            Ok(handled)
        }
        Err(err) => {
            tracing::error!(?err, "failed getting response from connector");
            Err(err.change_context(ConnectorError::ProcessingStepFailed(None)))
        }
    };

    let elapsed = start.elapsed().as_millis();
    tracing::Span::current().record("latency", elapsed);
    tracing::info!(%url, "outgoing request completed");
    result
}

fn masked_headers(headers: &Headers) -> Value {
    let map = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => Value::String(MASKED_HEADER_VALUE.to_string()),
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    Value::Object(map)
}

/// Wire-level rendering of the request, quoted and escaped line by line.
/// Holds secrets in the clear and must only be logged through a scrubber.
fn request_transcript(request: &Request) -> String {
    let mut head = format!("{} {} HTTP/1.1\r\n", request.method, request.url);
    for (name, value) in request.headers.iter() {
        let _ = write!(head, "{}: {}\r\n", name, value.clone().into_inner());
    }
    head.push_str("\r\n");

    let mut transcript = format!("<- {head:?}\n");
    if let Some(body) = request.body.as_ref() {
        let _ = writeln!(transcript, "<- {:?}", body.get_inner_value().expose());
    }
    transcript
}

fn response_transcript(response: &Response) -> String {
    format!(
        "-> {:?}\n-> {:?}\n",
        format!("HTTP/1.1 {}\r\n", response.status_code),
        String::from_utf8_lossy(&response.response),
    )
}

/// The `reqwest` implementation of [`ConnectorTransport`].
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    proxy: Proxy,
}

impl HttpClient {
    pub fn new(proxy: Proxy) -> Self {
        Self { proxy }
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for HttpClient {
    async fn call_connector_api(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        call_connector_api(&self.proxy, request).await
    }
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.should_bypass(url.as_str());

    let client = get_base_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let request = {
        match request.method {
            Method::Get => client.get(url),
            Method::Post | Method::Put | Method::Patch | Method::Delete => {
                let client = match request.method {
                    Method::Put => client.put(url),
                    Method::Patch => client.patch(url),
                    Method::Delete => client.delete(url),
                    _ => client.post(url),
                };
                match request.body {
                    Some(RequestContent::Json(payload)) => client.json(&payload),
                    Some(RequestContent::Xml(payload)) => client.body(payload),
                    Some(RequestContent::RawBytes(payload)) => client.body(payload),
                    None => client,
                }
            }
        }
        .add_headers(headers)
    };

    let response = request.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        tracing::info!(tags = "REQUEST_FAILURE", "Unable to send request to connector.");
        report!(api_error)
    });

    handle_response(response).await
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy || !proxy_config.is_configured() {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                tracing::error!(?err, "Failed to construct base client");
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    tracing::error!(?err, "HTTPS proxy configuration error");
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    tracing::error!(?err, "HTTP proxy configuration error");
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    response: CustomResult<reqwest::Response, ApiClientError>,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let resp = response?;
    let status_code = resp.status().as_u16();
    let headers = Some(resp.headers().to_owned());
    let response = resp
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)?;
    let response = Response {
        headers,
        response,
        status_code,
    };
    if (200..300).contains(&status_code) {
        Ok(Ok(response))
    } else {
        tracing::info!(status_code, "connector answered with a non-success status");
        Ok(Err(response))
    }
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use std::sync::Mutex;

    use common_utils::request::RequestBuilder;
    use domain_types::{
        connector_flow::Void,
        connector_types::{PaymentFlowData, PaymentVoidData, PaymentsResponseData},
        router_data::{ConnectorAuthType, ErrorResponse},
        router_request_types::PaymentOptions,
        types::Connectors,
    };
    use hyperswitch_masking::Mask;
    use interfaces::{
        api::ConnectorCommon,
        connector_integration_v2::{ConnectorIntegrationAnyV2, ConnectorIntegrationV2},
        scrubber::TranscriptScrubber,
    };

    use super::*;

    struct Echo;

    static ECHO: Echo = Echo;

    impl ConnectorCommon for Echo {
        fn id(&self) -> &'static str {
            "echo"
        }

        fn base_url<'a>(&self, connectors: &'a Connectors, test_mode: bool) -> &'a str {
            connectors.decidir.get_base_url(test_mode)
        }
    }

    impl TranscriptScrubber for Echo {}

    impl ConnectorIntegrationV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
        for Echo
    {
        fn get_url(
            &self,
            req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        ) -> CustomResult<String, ConnectorError> {
            Ok(format!(
                "{}/payments/{}",
                self.base_url(&req.resource_common_data.connectors, true),
                req.request.connector_authorization
            ))
        }

        fn handle_response_v2(
            &self,
            data: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
            res: Response,
        ) -> CustomResult<
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
            ConnectorError,
        > {
            let status = String::from_utf8_lossy(&res.response).to_string();
            let response = if status == "approved" {
                Ok(PaymentsResponseData {
                    message: status,
                    authorization: None,
                    avs_result: None,
                    cvv_result: None,
                })
            } else {
                Err(ErrorResponse {
                    message: status,
                    status_code: res.status_code,
                    ..Default::default()
                })
            };
            Ok(data.clone().set_response(response))
        }
    }

    struct CannedTransport {
        response: Mutex<Option<CustomResult<Result<Response, Response>, ApiClientError>>>,
        seen_urls: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn new(response: CustomResult<Result<Response, Response>, ApiClientError>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                seen_urls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ConnectorTransport for CannedTransport {
        async fn call_connector_api(
            &self,
            request: Request,
        ) -> CustomResult<Result<Response, Response>, ApiClientError> {
            self.seen_urls.lock().unwrap().push(request.url);
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("transport called more than once")
        }
    }

    fn body(status_code: u16, text: &'static str) -> Response {
        Response {
            headers: None,
            response: bytes::Bytes::from_static(text.as_bytes()),
            status_code,
        }
    }

    fn router_data() -> RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
    {
        RouterDataV2::new(
            PaymentFlowData::new(Connectors::default(), true),
            ConnectorAuthType::NoKey,
            PaymentVoidData {
                connector_authorization: "123".to_string(),
                options: PaymentOptions::default(),
            },
        )
    }

    #[tokio::test]
    async fn successful_bodies_are_handled() {
        let transport = CannedTransport::new(Ok(Ok(body(200, "approved"))));
        let result =
            execute_connector_processing_step(
                &transport,
                ECHO.get_connector_integration_v2(),
                router_data(),
            )
                .await
                .unwrap();

        assert!(result.response.is_ok());
        assert_eq!(
            transport.seen_urls.lock().unwrap().as_slice(),
            ["https://developers.decidir.com/api/v2/payments/123"]
        );
    }

    #[tokio::test]
    async fn error_status_bodies_are_classified_not_raised() {
        let transport = CannedTransport::new(Ok(Err(body(402, "rejected"))));
        let result =
            execute_connector_processing_step(
                &transport,
                ECHO.get_connector_integration_v2(),
                router_data(),
            )
                .await
                .unwrap();

        let error = result.response.unwrap_err();
        assert_eq!(error.message, "rejected");
        assert_eq!(error.status_code, 402);
    }

    #[tokio::test]
    async fn missing_body_is_a_processing_failure() {
        let transport =
            CannedTransport::new(Err(report!(ApiClientError::RequestTimeoutReceived)));
        let err =
            execute_connector_processing_step(
                &transport,
                ECHO.get_connector_integration_v2(),
                router_data(),
            )
                .await
                .unwrap_err();

        assert_eq!(
            err.current_context(),
            &ConnectorError::ProcessingStepFailed(None)
        );
    }

    #[tokio::test]
    async fn status_codes_split_into_success_and_error_bodies() {
        let ok = handle_response(Ok(reqwest::Response::from(
            http::Response::builder().status(201).body("{}").unwrap(),
        )))
        .await
        .unwrap();
        assert!(matches!(ok, Ok(Response { status_code: 201, .. })));

        let err = handle_response(Ok(reqwest::Response::from(
            http::Response::builder()
                .status(422)
                .body(r#"{"error_type":"invalid_request_error"}"#)
                .unwrap(),
        )))
        .await
        .unwrap();
        let err = err.unwrap_err();
        assert_eq!(err.status_code, 422);
        assert_eq!(
            err.response.as_ref(),
            br#"{"error_type":"invalid_request_error"}"#
        );

        let partial = handle_response(Ok(reqwest::Response::from(
            http::Response::builder().status(203).body(r#"{"id":1}"#).unwrap(),
        )))
        .await
        .unwrap()
        .unwrap();
        assert_eq!(partial.status_code, 203);
        assert_eq!(partial.response.as_ref(), br#"{"id":1}"#);

        let not_modified = handle_response(Ok(reqwest::Response::from(
            http::Response::builder().status(304).body("cached").unwrap(),
        )))
        .await
        .unwrap()
        .unwrap_err();
        assert_eq!(not_modified.status_code, 304);
        assert_eq!(not_modified.response.as_ref(), b"cached");
        assert!(not_modified.headers.is_some());
    }

    #[test]
    fn masked_headers_hide_secret_values() {
        let request = RequestBuilder::new()
            .url("https://example.com")
            .header("Content-Type", "application/json")
            .headers(vec![("apikey".to_string(), "k3y".to_string().into_masked())])
            .build();

        let headers = masked_headers(&request.headers);
        assert_eq!(headers["apikey"], MASKED_HEADER_VALUE);
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn request_transcript_escapes_body() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://example.com/payments")
            .headers(vec![("apikey".to_string(), "k3y".to_string().into_masked())])
            .set_body(RequestContent::Json(Box::new(json!({ "card_number": "4111" }))))
            .build();

        let transcript = request_transcript(&request);
        assert!(transcript.starts_with("<- \"POST https://example.com/payments HTTP/1.1\\r\\n"));
        assert!(transcript.contains("apikey: k3y"));
        assert!(transcript.contains(r#"<- "{\"card_number\":\"4111\"}""#));
    }
}
