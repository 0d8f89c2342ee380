use common_utils::{CustomResult, MinorUnit};
use domain_types::{
    connector_flow::{self, Operation},
    connector_types::{
        PaymentFlowData, PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsResponseData, PaymentsSyncData, RefundsData,
    },
    errors::ConnectorError,
};

use crate::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2,
    scrubber::TranscriptScrubber,
};

pub trait ConnectorServiceTrait:
    ConnectorCommon
    + ValidationTrait
    + TranscriptScrubber
    + PaymentPurchaseV2
    + PaymentAuthorizeV2
    + PaymentCapture
    + RefundV2
    + PaymentVoidV2
    + PaymentTokenV2
    + PaymentSyncV2
    + PaymentCreditV2
{
}

pub type BoxedConnector = Box<&'static (dyn ConnectorServiceTrait + Sync)>;

/// How a connector checks a card without leaving a charge behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStrategy {
    /// Authorize `amount`, then void it. The void's own outcome is ignored.
    AuthorizeThenVoid { amount: MinorUnit },
    ZeroAmountAuthorize,
}

pub trait ValidationTrait {
    /// Fails fast, before any request is built, when the operation is not available to this
    /// connector or not permitted under the configured mode.
    fn validate_operation(
        &self,
        _operation: Operation,
        _preauth_mode: bool,
    ) -> CustomResult<(), ConnectorError> {
        Ok(())
    }

    fn verify_strategy(&self) -> VerifyStrategy {
        VerifyStrategy::ZeroAmountAuthorize
    }
}

pub trait PaymentPurchaseV2:
    ConnectorIntegrationV2<
    connector_flow::Purchase,
    PaymentFlowData,
    PaymentsAuthorizeData,
    PaymentsResponseData,
>
{
}

pub trait PaymentAuthorizeV2:
    ConnectorIntegrationV2<
    connector_flow::Authorize,
    PaymentFlowData,
    PaymentsAuthorizeData,
    PaymentsResponseData,
>
{
}

pub trait PaymentCapture:
    ConnectorIntegrationV2<
    connector_flow::Capture,
    PaymentFlowData,
    PaymentsCaptureData,
    PaymentsResponseData,
>
{
}

pub trait RefundV2:
    ConnectorIntegrationV2<connector_flow::Refund, PaymentFlowData, RefundsData, PaymentsResponseData>
{
}

pub trait PaymentVoidV2:
    ConnectorIntegrationV2<connector_flow::Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
}

pub trait PaymentTokenV2:
    ConnectorIntegrationV2<
    connector_flow::Store,
    PaymentFlowData,
    PaymentMethodTokenizationData,
    PaymentsResponseData,
>
{
}

pub trait PaymentSyncV2:
    ConnectorIntegrationV2<
    connector_flow::Inquire,
    PaymentFlowData,
    PaymentsSyncData,
    PaymentsResponseData,
>
{
}

pub trait PaymentCreditV2:
    ConnectorIntegrationV2<
    connector_flow::Credit,
    PaymentFlowData,
    PaymentsAuthorizeData,
    PaymentsResponseData,
>
{
}
