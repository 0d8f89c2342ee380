//! Amount types shared by the connectors

use std::fmt::Display;

use common_enums::enums;

use crate::errors::ParsingError;

/// Amount convertor trait for connector
pub trait AmountConvertor: Send {
    /// Output type for the connector
    type Output;
    /// helps in conversion of connector required amount type
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>>;

    /// helps in converting back connector required amount type to core minor unit
    fn convert_back(
        &self,
        amount: Self::Output,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>>;
}

/// Connector takes the amount as a string of minor units, e.g. `"1000"`
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct StringMinorUnitForConnector;

impl AmountConvertor for StringMinorUnitForConnector {
    type Output = StringMinorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount.to_minor_unit_as_string())
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        _currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64()
    }
}

/// Connector takes the amount as an integer of minor units
#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq)]
pub struct MinorUnitForConnector;

impl AmountConvertor for MinorUnitForConnector {
    type Output = MinorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount)
    }
    fn convert_back(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        Ok(amount)
    }
}

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor default unit i.e zero
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    fn to_minor_unit_as_string(self) -> StringMinorUnit {
        StringMinorUnit::new(self.0.to_string())
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector specific types to send
#[derive(
    Default, Debug, serde::Deserialize, serde::Serialize, Clone, PartialEq, Eq, Hash, PartialOrd,
)]
pub struct StringMinorUnit(String);

impl StringMinorUnit {
    fn new(value: String) -> Self {
        Self(value)
    }

    /// Wraps an amount segment read back from a previously issued reference.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }

    fn to_minor_unit_as_i64(&self) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_i64 = self.0.trim().parse::<i64>().map_err(|e| {
            ParsingError::StringToI64ConversionFailure {
                error: e.to_string(),
            }
        })?;
        Ok(MinorUnit::new(amount_i64))
    }
}

impl Display for StringMinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod amount_conversion_tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn string_minor_unit_conversion() {
        let request_amount = MinorUnit::new(1000);
        let converted = StringMinorUnitForConnector
            .convert(request_amount, enums::Currency::USD)
            .unwrap();
        assert_eq!(converted.to_string(), "1000");

        let back = StringMinorUnitForConnector
            .convert_back(converted, enums::Currency::USD)
            .unwrap();
        assert_eq!(back, request_amount);
    }

    #[test]
    fn minor_unit_is_passed_through() {
        let amount = MinorUnitForConnector
            .convert(MinorUnit::new(250), enums::Currency::ARS)
            .unwrap();
        assert_eq!(amount, MinorUnit::new(250));
        assert_eq!(serde_json::to_string(&amount).unwrap(), "250");
    }

    #[test]
    fn garbage_string_amount_is_rejected() {
        let result = StringMinorUnitForConnector
            .convert_back(StringMinorUnit::from_raw("12.50"), enums::Currency::USD);
        assert!(result.is_err());
    }
}
