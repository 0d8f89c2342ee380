pub mod issuer;
pub mod validate;

use common_utils::errors;
use error_stack::report;
use hyperswitch_masking::{PeekInterface, StrongSecret};

pub use crate::{
    issuer::{get_card_issuer, CardIssuer},
    validate::{CCValError, CardNumber, CardNumberStrategy, NetworkToken},
};

#[derive(Clone, Debug)]
pub struct CardExpirationMonth(StrongSecret<u8>);

impl CardExpirationMonth {
    pub fn new(secret: StrongSecret<u8>) -> errors::CustomResult<Self, errors::ValidationError> {
        let month = secret.peek();

        if *month >= 1 && *month <= 12 {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string()
            }))
        }
    }

    pub fn two_digits(&self) -> String {
        format!("{:02}", self.0.peek())
    }
}

impl TryFrom<&str> for CardExpirationMonth {
    type Error = error_stack::Report<errors::ValidationError>;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let month = value.trim().parse::<u8>().map_err(|_| {
            report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string()
            })
        })?;
        Self::new(StrongSecret::new(month))
    }
}

/// Expiry year, normalized to four digits. Two-digit input is read as 20xx.
#[derive(Clone, Debug)]
pub struct CardExpirationYear(StrongSecret<u16>);

impl CardExpirationYear {
    pub fn new(secret: StrongSecret<u16>) -> errors::CustomResult<Self, errors::ValidationError> {
        let year = secret.peek();

        if *year >= 1997 && *year <= 9999 {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration year".to_string()
            }))
        }
    }

    pub fn four_digits(&self) -> String {
        self.0.peek().to_string()
    }

    pub fn two_digits(&self) -> String {
        format!("{:02}", self.0.peek() % 100)
    }
}

impl TryFrom<&str> for CardExpirationYear {
    type Error = error_stack::Report<errors::ValidationError>;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let year = trimmed.parse::<u16>().map_err(|_| {
            report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration year".to_string()
            })
        })?;
        let year = if trimmed.len() <= 2 { 2000 + year } else { year };
        Self::new(StrongSecret::new(year))
    }
}

impl PeekInterface<StrongSecret<u8>> for CardExpirationMonth {
    fn peek(&self) -> &StrongSecret<u8> {
        &self.0
    }
}

impl PeekInterface<StrongSecret<u16>> for CardExpirationYear {
    fn peek(&self) -> &StrongSecret<u16> {
        &self.0
    }
}
