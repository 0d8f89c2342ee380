use common_utils::{AmountConvertor, MinorUnit};
use error_stack::ResultExt;

use crate::errors;

pub type Error = error_stack::Report<errors::ConnectorError>;

pub fn convert_amount<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: MinorUnit,
    currency: common_enums::Currency,
) -> core::result::Result<T, Error> {
    amount_convertor
        .convert(amount, currency)
        .change_context(errors::ConnectorError::AmountConversionFailed)
}

pub fn convert_back_amount_to_minor_units<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: T,
    currency: common_enums::Currency,
) -> core::result::Result<MinorUnit, Error> {
    amount_convertor
        .convert_back(amount, currency)
        .change_context(errors::ConnectorError::AmountConversionFailed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::{StringMinorUnit, StringMinorUnitForConnector};

    use super::*;

    #[test]
    fn failed_conversions_become_connector_errors() {
        let err = convert_back_amount_to_minor_units(
            &StringMinorUnitForConnector,
            StringMinorUnit::from_raw("ten"),
            common_enums::Currency::USD,
        )
        .unwrap_err();
        assert_eq!(
            err.current_context(),
            &errors::ConnectorError::AmountConversionFailed
        );
    }
}
