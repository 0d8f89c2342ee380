pub mod requests;
pub mod responses;
pub mod transformers;


use common_utils::{
    consts, request::RequestContent, AmountConvertor, CustomResult, MinorUnit, StringMinorUnit,
    StringMinorUnitForConnector,
};
use domain_types::{
    connector_flow::{Authorize, Capture, Credit, FlowOperation, Operation, Purchase, Refund, Store, Void},
    connector_types::{
        PaymentFlowData, PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsResponseData, RefundsData,
    },
    errors,
    router_data_v2::RouterDataV2,
    router_request_types::PaymentOptions,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use hyperswitch_masking::Maskable;
use interfaces::{
    api::ConnectorCommon,
    connector_integration_v2::ConnectorIntegrationV2,
    connector_types::{ValidationTrait, VerifyStrategy},
    scrubber::TranscriptScrubber,
};
use once_cell::sync::Lazy;
use regex::Regex;
use requests::{JetpayRequest, JetpayTransactionType};
use transformers::{self as jetpayv2, JetpayAuthorization, JetpayReferenceData, JetpayRouterData};

use super::macros;
use crate::{types::ResponseRouterData, utils};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

#[derive(Clone)]
pub struct Jetpayv2 {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMinorUnit> + Sync),
}

impl Jetpayv2 {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMinorUnitForConnector,
        }
    }

    fn build_headers(&self) -> Vec<(String, Maskable<String>)> {
        vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().to_string().into(),
        )]
    }

    fn endpoint(&self, common: &PaymentFlowData) -> String {
        self.base_url(&common.connectors, common.test_mode).to_string()
    }

    fn amounts(
        &self,
        amount: MinorUnit,
        options: &PaymentOptions,
    ) -> CustomResult<(StringMinorUnit, Option<StringMinorUnit>), errors::ConnectorError> {
        let currency = options.get_currency_or(jetpayv2::DEFAULT_CURRENCY);
        let amount = utils::convert_amount(self.amount_converter, amount, currency)?;
        let tax_amount = options
            .tax_amount
            .map(|tax| utils::convert_amount(self.amount_converter, tax, currency))
            .transpose()?;
        Ok((amount, tax_amount))
    }

    fn xml_body(
        &self,
        request: &JetpayRequest,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        Ok(Some(RequestContent::Xml(jetpayv2::serialize_request(
            request,
        )?)))
    }

    fn instrument_request_body<F>(
        &self,
        req: &RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        transaction_type: JetpayTransactionType,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let (amount, tax_amount) = self.amounts(req.request.minor_amount, &req.request.options)?;
        let connector_router_data = JetpayRouterData::from((amount, tax_amount, req));
        let connector_req = JetpayRequest::try_from((&connector_router_data, transaction_type))?;
        self.xml_body(&connector_req)
    }

    fn handle_jetpay_response<F, Req>(
        &self,
        data: &RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, errors::ConnectorError>
    where
        F: FlowOperation + Clone,
        Req: JetpayReferenceData + Clone,
    {
        let params = jetpayv2::parse_response(&res.response);
        let response = responses::JetpayResponse::from_params(&params);
        tracing::info!(
            connector = self.id(),
            operation = %F::OPERATION,
            action_code = response.action_code.as_deref().unwrap_or_default(),
            "jetpay responded"
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

macros::impl_connector_service!(Jetpayv2);

impl ValidationTrait for Jetpayv2 {
    fn validate_operation(
        &self,
        operation: Operation,
        _preauth_mode: bool,
    ) -> CustomResult<(), errors::ConnectorError> {
        match operation {
            Operation::Inquire => Err(macros::flow_not_supported!(self.id(), operation))
                .attach_printable("jetpay has no status lookup"),
            _ => Ok(()),
        }
    }

    fn verify_strategy(&self) -> VerifyStrategy {
        VerifyStrategy::ZeroAmountAuthorize
    }
}

impl ConnectorCommon for Jetpayv2 {
    fn id(&self) -> &'static str {
        "jetpayv2"
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/xml"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors, test_mode: bool) -> &'a str {
        connectors.jetpayv2.get_base_url(test_mode)
    }
}

static SCRUB_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    [
        (r"(Authorization: Basic )\w+", format!("${{1}}{}", consts::FILTERED)),
        (r"(>)\d+(</CardNum>)", format!("${{1}}{}${{2}}", consts::FILTERED)),
        (r"(<CVV2>)\d+(</CVV2>)", format!("${{1}}{}${{2}}", consts::FILTERED)),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| {
        Regex::new(pattern)
            .map(|rule| (rule, replacement))
            .map_err(|error| tracing::error!(%error, pattern, "invalid scrub pattern"))
            .ok()
    })
    .collect()
});

impl TranscriptScrubber for Jetpayv2 {
    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn scrub(&self, transcript: &str) -> String {
        SCRUB_RULES
            .iter()
            .fold(transcript.to_string(), |scrubbed, (rule, replacement)| {
                rule.replace_all(&scrubbed, replacement.as_str()).into_owned()
            })
    }
}

impl ConnectorIntegrationV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.instrument_request_body(req, JetpayTransactionType::Sale)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Purchase, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

impl ConnectorIntegrationV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.instrument_request_body(req, JetpayTransactionType::Authonly)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

impl ConnectorIntegrationV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let (amount, tax_amount) =
            self.amounts(req.request.minor_amount_to_capture, &req.request.options)?;
        let connector_router_data = JetpayRouterData::from((amount, tax_amount, req));
        self.xml_body(&JetpayRequest::try_from(&connector_router_data)?)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

impl ConnectorIntegrationV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let (amount, tax_amount) =
            self.amounts(req.request.minor_refund_amount, &req.request.options)?;
        let connector_router_data = JetpayRouterData::from((amount, tax_amount, req));
        self.xml_body(&JetpayRequest::try_from(&connector_router_data)?)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Refund, PaymentFlowData, RefundsData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

impl ConnectorIntegrationV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    // the voided amount travels inside the reference
    fn get_request_body(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let original_amount =
            JetpayAuthorization::decode(&req.request.connector_authorization).original_amount()?;
        let amount = utils::convert_amount(
            self.amount_converter,
            original_amount,
            req.request.options.get_currency_or(jetpayv2::DEFAULT_CURRENCY),
        )?;
        let connector_router_data = JetpayRouterData::from((amount, None, req));
        self.xml_body(&JetpayRequest::try_from(&connector_router_data)?)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

impl ConnectorIntegrationV2<Store, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Store, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Store, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Store, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.xml_body(&JetpayRequest::try_from(req)?)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Store, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Store, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

impl ConnectorIntegrationV2<Credit, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Jetpayv2
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Credit, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Credit, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Credit, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        self.instrument_request_body(req, JetpayTransactionType::Credit)
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Credit, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Credit, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        self.handle_jetpay_response(data, res)
    }
}

macros::impl_unsupported_flows!(Jetpayv2, [(Inquire, PaymentsSyncData)]);
