/// Implements every per-flow marker trait and `ConnectorServiceTrait` for a connector.
macro_rules! impl_connector_service {
    ($connector: ident) => {
        impl ::interfaces::connector_types::ConnectorServiceTrait for $connector {}
        impl ::interfaces::connector_types::PaymentPurchaseV2 for $connector {}
        impl ::interfaces::connector_types::PaymentAuthorizeV2 for $connector {}
        impl ::interfaces::connector_types::PaymentCapture for $connector {}
        impl ::interfaces::connector_types::RefundV2 for $connector {}
        impl ::interfaces::connector_types::PaymentVoidV2 for $connector {}
        impl ::interfaces::connector_types::PaymentTokenV2 for $connector {}
        impl ::interfaces::connector_types::PaymentSyncV2 for $connector {}
        impl ::interfaces::connector_types::PaymentCreditV2 for $connector {}
    };
}

/// Flows a connector does not offer. The trait defaults answer `FlowNotSupported`.
macro_rules! impl_unsupported_flows {
    ($connector: ident, [$(($flow: ident, $request: ident)),* $(,)?]) => {
        $(
            impl
                ::interfaces::connector_integration_v2::ConnectorIntegrationV2<
                    ::domain_types::connector_flow::$flow,
                    ::domain_types::connector_types::PaymentFlowData,
                    ::domain_types::connector_types::$request,
                    ::domain_types::connector_types::PaymentsResponseData,
                > for $connector
            {
            }
        )*
    };
}

/// Rejects an operation under the given mode with `FlowNotSupported`.
macro_rules! flow_not_supported {
    ($connector: expr, $operation: expr) => {
        ::error_stack::report!(::domain_types::errors::ConnectorError::FlowNotSupported {
            flow: $operation.to_string(),
            connector: $connector.to_string(),
        })
    };
}

pub(crate) use flow_not_supported;
pub(crate) use impl_connector_service;
pub(crate) use impl_unsupported_flows;
