use cards::{CardExpirationMonth, CardExpirationYear, CardIssuer};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::ConnectorError;

type Error = error_stack::Report<ConnectorError>;

/// The instrument a payment is made with. Each variant contributes its own request fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethodData {
    Card(Card),
    NetworkToken(NetworkTokenData),
    /// A previously returned authorization reference or vaulted token.
    StoredReference { reference: Secret<String> },
}

impl PaymentMethodData {
    pub fn get_payment_method_type(&self) -> &'static str {
        match self {
            Self::Card(_) => "card",
            Self::NetworkToken(_) => "network_token",
            Self::StoredReference { .. } => "stored_reference",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub card_number: cards::CardNumber,
    pub card_exp_month: Secret<String>,
    pub card_exp_year: Secret<String>,
    pub card_holder_name: Option<Secret<String>>,
    pub card_cvc: Option<Secret<String>>,
}

impl Card {
    pub fn get_card_issuer(&self) -> Option<CardIssuer> {
        cards::get_card_issuer(self.card_number.peek())
    }

    pub fn get_expiry_month_2_digit(&self) -> Result<Secret<String>, Error> {
        expiry_month_2_digit(&self.card_exp_month)
    }

    pub fn get_card_expiry_year_2_digit(&self) -> Result<Secret<String>, Error> {
        expiry_year_2_digit(&self.card_exp_year)
    }

    /// The verification value, treating an empty string as absent.
    pub fn get_cvc(&self) -> Option<Secret<String>> {
        non_empty(self.card_cvc.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkTokenData {
    pub token_number: cards::NetworkToken,
    pub token_exp_month: Secret<String>,
    pub token_exp_year: Secret<String>,
    pub token_cryptogram: Option<Secret<String>>,
    pub eci: Option<String>,
    pub card_holder_name: Option<Secret<String>>,
    pub card_cvc: Option<Secret<String>>,
}

impl NetworkTokenData {
    pub fn get_card_issuer(&self) -> Option<CardIssuer> {
        cards::get_card_issuer(self.token_number.peek())
    }

    pub fn get_expiry_month_2_digit(&self) -> Result<Secret<String>, Error> {
        expiry_month_2_digit(&self.token_exp_month)
    }

    pub fn get_expiry_year_2_digit(&self) -> Result<Secret<String>, Error> {
        expiry_year_2_digit(&self.token_exp_year)
    }

    pub fn get_cvc(&self) -> Option<Secret<String>> {
        non_empty(self.card_cvc.as_ref())
    }
}

fn expiry_month_2_digit(month: &Secret<String>) -> Result<Secret<String>, Error> {
    CardExpirationMonth::try_from(month.peek().as_str())
        .map(|month| Secret::new(month.two_digits()))
        .map_err(|err| err.change_context(ConnectorError::RequestEncodingFailed))
}

fn expiry_year_2_digit(year: &Secret<String>) -> Result<Secret<String>, Error> {
    CardExpirationYear::try_from(year.peek().as_str())
        .map(|year| Secret::new(year.two_digits()))
        .map_err(|err| err.change_context(ConnectorError::RequestEncodingFailed))
}

fn non_empty(value: Option<&Secret<String>>) -> Option<Secret<String>> {
    value.filter(|value| !value.peek().is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use super::*;

    fn card(cvc: &str) -> Card {
        Card {
            card_number: cards::CardNumber::from_str("4507990000004905").unwrap(),
            card_exp_month: Secret::new("8".to_string()),
            card_exp_year: Secret::new("2030".to_string()),
            card_holder_name: Some(Secret::new("Jane Doe".to_string())),
            card_cvc: Some(Secret::new(cvc.to_string())),
        }
    }

    #[test]
    fn card_expiry_is_two_digits() {
        let card = card("123");
        assert_eq!(card.get_expiry_month_2_digit().unwrap().peek(), "08");
        assert_eq!(card.get_card_expiry_year_2_digit().unwrap().peek(), "30");
        assert_eq!(card.get_card_issuer(), Some(CardIssuer::Visa));
    }

    #[test]
    fn empty_cvc_is_absent() {
        assert!(card("").get_cvc().is_none());
        assert_eq!(card("123").get_cvc().unwrap().peek(), "123");
    }

    #[test]
    fn invalid_month_is_an_encoding_error() {
        let mut card = card("123");
        card.card_exp_month = Secret::new("13".to_string());
        let err = card.get_expiry_month_2_digit().unwrap_err();
        assert_eq!(err.current_context(), &ConnectorError::RequestEncodingFailed);
    }

    #[test]
    fn instrument_is_tagged_on_the_wire() {
        let data: PaymentMethodData = serde_json::from_value(serde_json::json!({
            "type": "stored_reference",
            "reference": "123;456;1000;tok"
        }))
        .unwrap();
        assert_eq!(data.get_payment_method_type(), "stored_reference");
    }
}
