use std::{fmt, ops::Deref, str::FromStr};

use hyperswitch_masking::{PeekInterface, Strategy, StrongSecret, WithType};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Deserialize, Serialize, Error)]
#[error("not a valid credit card number")]
pub struct CCValError;

impl From<core::convert::Infallible> for CCValError {
    fn from(_: core::convert::Infallible) -> Self {
        Self
    }
}

/// Card number
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CardNumber(StrongSecret<String, CardNumberStrategy>);

impl CardNumber {
    /// The first six digits, the issuer identification number.
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect::<String>()
    }

    pub fn get_card_no(&self) -> String {
        self.0.peek().chars().collect::<String>()
    }

    pub fn get_last4(&self) -> String {
        last_four(self.0.peek())
    }
}

impl FromStr for CardNumber {
    type Err = CCValError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cc_no_whitespace: String = s.split_whitespace().collect();
        match luhn::valid(&cc_no_whitespace) {
            true => Ok(Self(StrongSecret::from_str(&cc_no_whitespace)?)),
            false => Err(CCValError),
        }
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CCValError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl Deref for CardNumber {
    type Target = StrongSecret<String, CardNumberStrategy>;

    fn deref(&self) -> &StrongSecret<String, CardNumberStrategy> {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Network token number, the device-bound PAN a card network issues in place of the card number
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct NetworkToken(StrongSecret<String, CardNumberStrategy>);

impl NetworkToken {
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect::<String>()
    }

    pub fn get_last4(&self) -> String {
        last_four(self.0.peek())
    }
}

impl FromStr for NetworkToken {
    type Err = CCValError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token_no_whitespace: String = s.split_whitespace().collect();
        match luhn::valid(&token_no_whitespace) {
            true => Ok(Self(StrongSecret::from_str(&token_no_whitespace)?)),
            false => Err(CCValError),
        }
    }
}

impl Deref for NetworkToken {
    type Target = StrongSecret<String, CardNumberStrategy>;

    fn deref(&self) -> &StrongSecret<String, CardNumberStrategy> {
        &self.0
    }
}

impl<'de> Deserialize<'de> for NetworkToken {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

fn last_four(number: &str) -> String {
    let skip = number.chars().count().saturating_sub(4);
    number.chars().skip(skip).collect()
}

pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        if val_str.len() < 15 || val_str.len() > 19 {
            return WithType::fmt(val, f);
        }

        if let Some(value) = val_str.get(..6) {
            write!(f, "{}{}", value, "*".repeat(val_str.len() - 6))
        } else {
            tracing::error!("Invalid card number {val_str}");
            WithType::fmt(val, f)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use hyperswitch_masking::Secret;

    use super::*;

    #[test]
    fn valid_card_number() {
        let s = "371449635398431";
        assert_eq!(
            CardNumber::from_str(s).unwrap(),
            CardNumber(StrongSecret::from_str(s).unwrap())
        );
    }

    #[test]
    fn invalid_card_number() {
        let s = "371446431";
        assert_eq!(
            CardNumber::from_str(s).unwrap_err().to_string(),
            "not a valid credit card number".to_string()
        );
    }

    #[test]
    fn card_number_no_whitespace() {
        let s = "3714    4963  5398 431";
        assert_eq!(
            format!("{:?}", *CardNumber::from_str(s).unwrap()),
            "371449*********"
        );
    }

    #[test]
    fn test_valid_card_number_masking() {
        let secret: Secret<String, CardNumberStrategy> =
            Secret::new("1234567890987654".to_string());
        assert_eq!("123456**********", format!("{secret:?}"));
    }

    #[test]
    fn test_invalid_card_number_masking() {
        let secret: Secret<String, CardNumberStrategy> = Secret::new("1234567890".to_string());
        assert_eq!("*** alloc::string::String ***", format!("{secret:?}"));
    }

    #[test]
    fn bin_and_last_four() {
        let card_number = CardNumber::from_str("4111 1111 1111 1111").unwrap();
        assert_eq!(card_number.get_card_isin(), "411111");
        assert_eq!(card_number.get_last4(), "1111");
        assert_eq!(card_number.get_card_no(), "4111111111111111");
    }

    #[test]
    fn test_valid_card_number_deserialization() {
        let card_number = serde_json::from_str::<CardNumber>(r#""3714 4963 5398 431""#).unwrap();
        assert_eq!(card_number.get_last4(), "8431");
        assert!(serde_json::from_str::<CardNumber>(r#""4111111111111112""#).is_err());
    }

    #[test]
    fn network_token_is_luhn_checked() {
        let token = NetworkToken::from_str("4895370015293175").unwrap();
        assert_eq!(token.get_card_isin(), "489537");
        assert_eq!(token.get_last4(), "3175");
        assert!(NetworkToken::from_str("4895370015293176").is_err());
    }
}
