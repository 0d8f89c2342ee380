#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{collections::VecDeque, str::FromStr, sync::Mutex};

use common_utils::{request::Request, CustomResult, Method};
use domain_types::{
    errors::ApiClientError,
    payment_method_data::{Card, PaymentMethodData},
    router_response_types::Response,
};
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::transport::ConnectorTransport;

/// What the gateway handed to the transport for one call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<String>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.body.as_deref().expect("request without a body")).unwrap()
    }
}

type Canned = CustomResult<Result<Response, Response>, ApiClientError>;

/// A transport that answers from a queue of canned responses and records every request.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: impl IntoIterator<Item = Canned>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for RecordingTransport {
    async fn call_connector_api(&self, request: Request) -> Canned {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.iter().map(|(name, _)| name.clone()).collect(),
            body: request
                .body
                .as_ref()
                .map(|body| body.get_inner_value().peek().clone()),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than responses were queued")
    }
}

pub fn ok(status_code: u16, body: &str) -> Canned {
    Ok(Ok(response(status_code, body)))
}

pub fn http_error(status_code: u16, body: &str) -> Canned {
    Ok(Err(response(status_code, body)))
}

pub fn unreachable_host() -> Canned {
    Err(error_stack::Report::new(ApiClientError::RequestNotSent(
        "connection refused".to_string(),
    )))
}

fn response(status_code: u16, body: &str) -> Response {
    Response {
        headers: None,
        response: bytes::Bytes::from(body.to_string()),
        status_code,
    }
}

pub fn card(number: &str) -> PaymentMethodData {
    PaymentMethodData::Card(Card {
        card_number: cards::CardNumber::from_str(number).unwrap(),
        card_exp_month: Secret::new("9".to_string()),
        card_exp_year: Secret::new("2030".to_string()),
        card_holder_name: Some(Secret::new("Longbob Longsen".to_string())),
        card_cvc: Some(Secret::new("123".to_string())),
    })
}
