use common_utils::MinorUnit;
use strum::{Display, EnumString};

use crate::{
    payment_method_data::PaymentMethodData,
    router_data_v2::RouterDataV2,
    router_request_types::PaymentOptions,
    router_response_types::{GatewayResult, ResponseParams},
    types::Connectors,
};

// snake case for enum variants
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumString, serde::Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConnectorEnum {
    Decidir,
    Jetpayv2,
}

/// Shared error vocabulary that provider codes are normalized into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumString, serde::Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StandardErrorCode {
    IncorrectNumber,
    InvalidNumber,
    InvalidExpiryDate,
    InvalidCvc,
    ExpiredCard,
    IncorrectCvc,
    IncorrectZip,
    IncorrectAddress,
    IncorrectPin,
    CardDeclined,
    ProcessingError,
    CallIssuer,
    PickupCard,
    ConfigError,
    TestModeLiveCard,
    UnsupportedFeature,
}

#[derive(Debug, Clone)]
pub struct PaymentFlowData {
    pub connectors: Connectors,
    pub test_mode: bool,
    /// The parsed connector response, kept whether or not the call succeeded.
    pub raw_connector_response: Option<ResponseParams>,
}

impl PaymentFlowData {
    pub fn new(connectors: Connectors, test_mode: bool) -> Self {
        Self {
            connectors,
            test_mode,
            raw_connector_response: None,
        }
    }

    pub fn set_raw_connector_response(mut self, params: ResponseParams) -> Self {
        self.raw_connector_response = Some(params);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentsResponseData {
    pub message: String,
    pub authorization: Option<String>,
    pub avs_result: Option<String>,
    pub cvv_result: Option<String>,
}

/// Request data for the direct-charge flows (purchase, authorize) and for unreferenced credits.
#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub minor_amount: MinorUnit,
    pub payment_method_data: PaymentMethodData,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentsCaptureData {
    pub minor_amount_to_capture: MinorUnit,
    /// Authorization reference returned by the authorize call.
    pub connector_authorization: String,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub minor_refund_amount: MinorUnit,
    pub connector_authorization: String,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub connector_authorization: String,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentMethodTokenizationData {
    pub payment_method_data: PaymentMethodData,
    pub options: PaymentOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentsSyncData {
    pub connector_authorization: String,
    pub options: PaymentOptions,
}

impl<F, Req> From<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>> for GatewayResult {
    fn from(router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>) -> Self {
        let test = router_data.resource_common_data.test_mode;
        let params = router_data
            .resource_common_data
            .raw_connector_response
            .unwrap_or_default();

        match router_data.response {
            Ok(response) => Self {
                success: true,
                message: response.message,
                params,
                authorization: response.authorization,
                error_code: None,
                test,
                avs_result: response.avs_result,
                cvv_result: response.cvv_result,
            },
            Err(error) => Self {
                success: false,
                message: error.message,
                params,
                authorization: error.connector_transaction_id,
                error_code: Some(error.code),
                test,
                avs_result: error.avs_result,
                cvv_result: error.cvv_result,
            },
        }
    }
}
