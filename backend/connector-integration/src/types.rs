use domain_types::connector_types::ConnectorEnum;
use interfaces::connector_types::BoxedConnector;

use crate::connectors;

#[derive(Clone)]
pub struct ConnectorData {
    pub connector: BoxedConnector,
    pub connector_name: ConnectorEnum,
}

impl ConnectorData {
    pub fn get_connector_by_name(connector_name: &ConnectorEnum) -> Self {
        let connector = Self::convert_connector(*connector_name);
        Self {
            connector,
            connector_name: *connector_name,
        }
    }

    fn convert_connector(connector_name: ConnectorEnum) -> BoxedConnector {
        match connector_name {
            ConnectorEnum::Decidir => Box::new(connectors::Decidir::new()),
            ConnectorEnum::Jetpayv2 => Box::new(connectors::Jetpayv2::new()),
        }
    }
}

pub struct ResponseRouterData<Response, RouterData> {
    pub response: Response,
    pub router_data: RouterData,
    pub http_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectors_are_resolved_by_name() {
        let decidir = ConnectorData::get_connector_by_name(&ConnectorEnum::Decidir);
        assert_eq!(decidir.connector.id(), "decidir");

        let jetpay = ConnectorData::get_connector_by_name(&ConnectorEnum::Jetpayv2);
        assert_eq!(jetpay.connector.id(), "jetpayv2");
        assert!(jetpay.connector.supports_scrubbing());
    }
}
