use std::{fmt::Debug, sync::Arc};

use common_utils::{CustomResult, MinorUnit};
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_flow::{Authorize, Capture, Credit, Inquire, Operation, Purchase, Refund, Store, Void},
    connector_types::{
        ConnectorEnum, PaymentFlowData, PaymentMethodTokenizationData, PaymentVoidData,
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData, PaymentsSyncData,
        RefundsData,
    },
    errors::ConnectorError,
    payment_method_data::PaymentMethodData,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    router_request_types::PaymentOptions,
    router_response_types::GatewayResult,
    types::Connectors,
};
use external_services::service::{execute_connector_processing_step, HttpClient};
use interfaces::{
    connector_integration_v2::BoxedConnectorIntegrationV2,
    connector_types::{ConnectorServiceTrait, VerifyStrategy},
    transport::ConnectorTransport,
};

use crate::configs::Config;

/// Per-merchant switches that shape every call made through a [`PaymentGateway`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Route calls to the connector's sandbox and mark results as test results.
    pub test_mode: bool,
    /// Decidir only: the account is configured for two-step authorize and capture.
    pub preauth_mode: bool,
}

/// One configured connector account.
///
/// Operations never panic on connector failures: a declined or unreadable answer comes back
/// as a failed [`GatewayResult`]. `Err` is reserved for calls that were refused before a
/// request was built, or for which no response at all could be obtained.
#[derive(Clone)]
pub struct PaymentGateway {
    connector: ConnectorData,
    config: GatewayConfig,
    auth_type: ConnectorAuthType,
    connectors: Connectors,
    transport: Arc<dyn ConnectorTransport>,
}

impl PaymentGateway {
    pub fn new(
        connector_name: ConnectorEnum,
        config: GatewayConfig,
        auth_type: ConnectorAuthType,
        connectors: Connectors,
        transport: Arc<dyn ConnectorTransport>,
    ) -> Self {
        Self {
            connector: ConnectorData::get_connector_by_name(&connector_name),
            config,
            auth_type,
            connectors,
            transport,
        }
    }

    /// A gateway that talks to the connector over HTTP, with endpoints, proxy and modes taken
    /// from the loaded configuration.
    pub fn from_config(
        connector_name: ConnectorEnum,
        auth_type: ConnectorAuthType,
        config: &Config,
    ) -> Self {
        Self::new(
            connector_name,
            config.gateway,
            auth_type,
            config.connectors.clone(),
            Arc::new(HttpClient::new(config.proxy.clone())),
        )
    }

    pub fn connector_name(&self) -> ConnectorEnum {
        self.connector.connector_name
    }

    pub fn config(&self) -> GatewayConfig {
        self.config
    }

    /// Sale: authorize and settle in one call.
    pub async fn purchase(
        &self,
        amount: MinorUnit,
        payment_method_data: PaymentMethodData,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Purchase)?;
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Purchase,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Purchase,
            connector_integration,
            PaymentsAuthorizeData {
                minor_amount: amount,
                payment_method_data,
                options,
            },
        )
        .await
    }

    /// Hold funds without settling them.
    pub async fn authorize(
        &self,
        amount: MinorUnit,
        payment_method_data: PaymentMethodData,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Authorize)?;
        self.run_authorize(amount, payment_method_data, options).await
    }

    /// Settle a prior authorization, identified by the reference it returned.
    pub async fn capture(
        &self,
        amount: MinorUnit,
        authorization: impl Into<String>,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Capture)?;
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Capture,
            PaymentFlowData,
            PaymentsCaptureData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Capture,
            connector_integration,
            PaymentsCaptureData {
                minor_amount_to_capture: amount,
                connector_authorization: authorization.into(),
                options,
            },
        )
        .await
    }

    pub async fn refund(
        &self,
        amount: MinorUnit,
        authorization: impl Into<String>,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Refund)?;
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Refund,
            PaymentFlowData,
            RefundsData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Refund,
            connector_integration,
            RefundsData {
                minor_refund_amount: amount,
                connector_authorization: authorization.into(),
                options,
            },
        )
        .await
    }

    /// Cancel a prior authorization or same-day sale.
    pub async fn void(
        &self,
        authorization: impl Into<String>,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Void)?;
        self.run_void(authorization.into(), options).await
    }

    /// Check that a card is chargeable without leaving a charge behind.
    ///
    /// When the connector verifies by authorizing and voiding, the result is the
    /// authorization's; the void's outcome is logged and otherwise ignored.
    pub async fn verify(
        &self,
        payment_method_data: PaymentMethodData,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Verify)?;
        match self.connector_service().verify_strategy() {
            VerifyStrategy::ZeroAmountAuthorize => {
                self.run_authorize(MinorUnit::zero(), payment_method_data, options)
                    .await
            }
            VerifyStrategy::AuthorizeThenVoid { amount } => {
                let authorization = self
                    .run_authorize(amount, payment_method_data, options.clone())
                    .await?;
                if !authorization.success {
                    return Ok(authorization);
                }
                if let Some(reference) = authorization.authorization.clone() {
                    match self.run_void(reference, options).await {
                        Ok(void) if !void.success => tracing::warn!(
                            error_code = ?void.error_code,
                            message = %void.message,
                            "void after verification authorize was declined"
                        ),
                        Ok(_) => {}
                        Err(error) => tracing::warn!(
                            ?error,
                            "void after verification authorize failed"
                        ),
                    }
                }
                Ok(authorization)
            }
        }
    }

    /// Exchange card data for a reusable token.
    pub async fn store(
        &self,
        payment_method_data: PaymentMethodData,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Store)?;
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Store,
            PaymentFlowData,
            PaymentMethodTokenizationData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Store,
            connector_integration,
            PaymentMethodTokenizationData {
                payment_method_data,
                options,
            },
        )
        .await
    }

    /// Look up the current state of a payment.
    pub async fn inquire(
        &self,
        authorization: impl Into<String>,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Inquire)?;
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Inquire,
            PaymentFlowData,
            PaymentsSyncData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Inquire,
            connector_integration,
            PaymentsSyncData {
                connector_authorization: authorization.into(),
                options,
            },
        )
        .await
    }

    /// Pay funds out to a card without a prior transaction.
    pub async fn credit(
        &self,
        amount: MinorUnit,
        payment_method_data: PaymentMethodData,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        self.validate(Operation::Credit)?;
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Credit,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Credit,
            connector_integration,
            PaymentsAuthorizeData {
                minor_amount: amount,
                payment_method_data,
                options,
            },
        )
        .await
    }

    async fn run_authorize(
        &self,
        amount: MinorUnit,
        payment_method_data: PaymentMethodData,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Authorize,
            connector_integration,
            PaymentsAuthorizeData {
                minor_amount: amount,
                payment_method_data,
                options,
            },
        )
        .await
    }

    async fn run_void(
        &self,
        authorization: String,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Void,
            PaymentFlowData,
            PaymentVoidData,
            PaymentsResponseData,
        > = self.connector_service().get_connector_integration_v2();
        self.process(
            Operation::Void,
            connector_integration,
            PaymentVoidData {
                connector_authorization: authorization,
                options,
            },
        )
        .await
    }

    fn connector_service(&self) -> &'static (dyn ConnectorServiceTrait + Sync) {
        *self.connector.connector
    }

    fn validate(&self, operation: Operation) -> CustomResult<(), ConnectorError> {
        self.connector_service()
            .validate_operation(operation, self.config.preauth_mode)
            .map_err(|error| {
                tracing::info!(
                    connector = %self.connector.connector_name,
                    %operation,
                    ?error,
                    "operation rejected before sending"
                );
                error
            })
    }

    #[tracing::instrument(
        name = "gateway_operation",
        skip_all,
        fields(connector = %self.connector.connector_name, %operation, test_mode = self.config.test_mode)
    )]
    async fn process<F, Req>(
        &self,
        operation: Operation,
        connector_integration: BoxedConnectorIntegrationV2<
            'static,
            F,
            PaymentFlowData,
            Req,
            PaymentsResponseData,
        >,
        request: Req,
    ) -> CustomResult<GatewayResult, ConnectorError>
    where
        F: Clone + 'static,
        Req: Clone + Debug + 'static,
    {
        let router_data = RouterDataV2::new(
            PaymentFlowData::new(self.connectors.clone(), self.config.test_mode),
            self.auth_type.clone(),
            request,
        );
        let router_data = execute_connector_processing_step(
            self.transport.as_ref(),
            connector_integration,
            router_data,
        )
        .await?;

        let result = GatewayResult::from(router_data);
        tracing::info!(
            success = result.success,
            error_code = ?result.error_code,
            "connector call classified"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use hyperswitch_masking::Secret;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn gateway_is_shareable_across_tasks() {
        assert_send_sync::<PaymentGateway>();
    }

    #[test]
    fn from_config_carries_modes_and_connector() {
        let config = Config::from_toml_str("[gateway]\npreauth_mode = true").unwrap();
        let gateway = PaymentGateway::from_config(
            ConnectorEnum::Decidir,
            ConnectorAuthType::HeaderKey {
                api_key: Secret::new("566f2e7b".to_string()),
            },
            &config,
        );

        assert_eq!(gateway.connector_name(), ConnectorEnum::Decidir);
        assert_eq!(
            gateway.config(),
            GatewayConfig {
                test_mode: false,
                preauth_mode: true,
            }
        );
    }
}
