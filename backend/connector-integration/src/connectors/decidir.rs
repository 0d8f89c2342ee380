pub mod transformers;

#[cfg(test)]
mod test;

use common_utils::{
    consts, request::Method, request::RequestContent, AmountConvertor, CustomResult, MinorUnit,
    MinorUnitForConnector,
};
use domain_types::{
    connector_flow::{Authorize, Capture, FlowOperation, Inquire, Operation, Purchase, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, PaymentsSyncData, RefundsData,
    },
    errors,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use hyperswitch_masking::{Mask, Maskable};
use interfaces::{
    api::ConnectorCommon,
    connector_integration_v2::ConnectorIntegrationV2,
    connector_types::{ValidationTrait, VerifyStrategy},
    scrubber::TranscriptScrubber,
};
use once_cell::sync::Lazy;
use regex::Regex;
use transformers::{self as decidir, DecidirAmountRequest, DecidirPaymentsRequest};

use super::macros;
use crate::{types::ResponseRouterData, utils};

pub(crate) mod headers {
    pub(crate) const API_KEY: &str = "apikey";
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const CACHE_CONTROL: &str = "Cache-Control";
}

#[derive(Clone)]
pub struct Decidir {
    amount_converter: &'static (dyn AmountConvertor<Output = MinorUnit> + Sync),
}

impl Decidir {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &MinorUnitForConnector,
        }
    }

    fn build_headers<F, Req>(
        &self,
        req: &RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let mut header = vec![
            (
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
            (headers::CACHE_CONTROL.to_string(), "no-cache".to_string().into()),
        ];
        let mut api_key = self.get_auth_header(&req.connector_auth_type)?;
        header.append(&mut api_key);
        Ok(header)
    }

    fn payments_url(&self, common: &PaymentFlowData) -> String {
        format!(
            "{}/payments",
            self.base_url(&common.connectors, common.test_mode)
        )
    }

    fn payment_url(
        &self,
        common: &PaymentFlowData,
        authorization: &str,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}/{}",
            self.payments_url(common),
            decidir::get_payment_id(authorization)?
        ))
    }

    fn payment_request_body<F>(
        &self,
        req: &RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.minor_amount,
            req.request.options.get_currency_or(decidir::DEFAULT_CURRENCY),
        )?;
        let connector_router_data = decidir::DecidirRouterData::from((amount, req));
        let connector_req = DecidirPaymentsRequest::try_from(&connector_router_data)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn amount_request_body(
        &self,
        amount: MinorUnit,
        options: &domain_types::router_request_types::PaymentOptions,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            amount,
            options.get_currency_or(decidir::DEFAULT_CURRENCY),
        )?;
        Ok(Some(RequestContent::Json(Box::new(
            DecidirAmountRequest::new(amount),
        ))))
    }

    fn handle_payments_response<F: FlowOperation + Clone, Req: Clone>(
        &self,
        data: &RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, errors::ConnectorError>
    {
        let params = decidir::parse_response(&res.response);
        let response = decidir::DecidirPaymentsResponse::from_params(&params);
        tracing::info!(
            connector = self.id(),
            operation = %F::OPERATION,
            status = response.status.as_deref().unwrap_or_default(),
            "decidir responded"
        );

        RouterDataV2::try_from(ResponseRouterData {
            response,
            router_data: data
                .clone()
                .update_resource_common_data(|common| common.set_raw_connector_response(params)),
            http_code: res.status_code,
        })
        .change_context(errors::ConnectorError::ResponseHandlingFailed)
    }
}

macros::impl_connector_service!(Decidir);

impl ValidationTrait for Decidir {
    fn validate_operation(
        &self,
        operation: Operation,
        preauth_mode: bool,
    ) -> CustomResult<(), errors::ConnectorError> {
        let allowed = match operation {
            Operation::Purchase => !preauth_mode,
            Operation::Authorize | Operation::Capture | Operation::Verify => preauth_mode,
            Operation::Refund | Operation::Void | Operation::Inquire => true,
            Operation::Store | Operation::Credit => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(macros::flow_not_supported!(self.id(), operation)).attach_printable(format!(
                "decidir does not allow {operation} with preauth_mode={preauth_mode}"
            ))
        }
    }

    fn verify_strategy(&self) -> VerifyStrategy {
        VerifyStrategy::AuthorizeThenVoid {
            amount: MinorUnit::new(100),
        }
    }
}

impl ConnectorCommon for Decidir {
    fn id(&self) -> &'static str {
        "decidir"
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = decidir::DecidirAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![(
            headers::API_KEY.to_string(),
            auth.api_key.into_masked(),
        )])
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors, test_mode: bool) -> &'a str {
        connectors.decidir.get_base_url(test_mode)
    }
}

static SCRUB_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(apikey: )\w+",
        r#"("card_number\\":\\")\d+"#,
        r#"("security_code\\":\\")\d+"#,
        r#"("emv_issuer_data\\":\\")[^\\"]+"#,
        r#"("cryptogram\\":\\"/)[^\\"]+"#,
        r#"("token_card_data\\":\{.*\\"token\\":\\")\d+"#,
    ]
    .into_iter()
    .filter_map(|pattern| {
        Regex::new(pattern)
            .map_err(|error| tracing::error!(%error, pattern, "invalid scrub pattern"))
            .ok()
    })
    .collect()
});

impl TranscriptScrubber for Decidir {
    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        SCRUB_RULES
            .iter()
            .fold(transcript.to_string(), |scrubbed, rule| {
                rule.replace_all(&scrubbed, format!("${{1}}{}", consts::FILTERED))
                    .into_owned()
            })
    }
}

impl ConnectorIntegrationV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Decidir
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.payments_url(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.payment_request_body(req)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_payments_response(data, res)
    }
}

impl ConnectorIntegrationV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Decidir
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.payments_url(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.payment_request_body(req)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_payments_response(data, res)
    }
}

impl ConnectorIntegrationV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
    for Decidir
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req)
    }

    fn get_http_method(&self) -> Method {
        Method::Put
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        self.payment_url(
            &req.resource_common_data,
            &req.request.connector_authorization,
        )
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.amount_request_body(req.request.minor_amount_to_capture, &req.request.options)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_payments_response(data, res)
    }
}

impl ConnectorIntegrationV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>
    for Decidir
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}/refunds",
            self.payment_url(
                &req.resource_common_data,
                &req.request.connector_authorization
            )?
        ))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.amount_request_body(req.request.minor_refund_amount, &req.request.options)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_payments_response(data, res)
    }
}

impl ConnectorIntegrationV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
    for Decidir
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req)
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}/refunds",
            self.payment_url(
                &req.resource_common_data,
                &req.request.connector_authorization
            )?
        ))
    }

    // a full refund: same endpoint, no amount
    fn get_request_body(
        &self,
        _req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        Ok(Some(RequestContent::Json(Box::new(
            DecidirAmountRequest::default(),
        ))))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_payments_response(data, res)
    }
}

impl ConnectorIntegrationV2<Inquire, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
    for Decidir
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Inquire, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req)
    }

    fn get_http_method(&self) -> Method {
        Method::Get
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Inquire, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        self.payment_url(
            &req.resource_common_data,
            &req.request.connector_authorization,
        )
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Inquire, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Inquire, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_payments_response(data, res)
    }
}

macros::impl_unsupported_flows!(
    Decidir,
    [
        (Store, PaymentMethodTokenizationData),
        (Credit, PaymentsAuthorizeData),
    ]
);
