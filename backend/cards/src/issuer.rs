//! Card brand detection from the card number prefix and length.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    Hash,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CardIssuer {
    Visa,
    Master,
    Maestro,
    AmericanExpress,
    Discover,
    DinersClub,
    #[strum(serialize = "jcb")]
    #[serde(rename = "jcb")]
    JCB,
    Naranja,
    Cabal,
    #[strum(serialize = "patagonia_365")]
    #[serde(rename = "patagonia_365")]
    Patagonia365,
    TarjetaSol,
}

// Ordered: the regional prefixes overlap the broader Maestro, Master and Discover ranges.
static CARD_REGEX: Lazy<Vec<(CardIssuer, Option<Regex>)>> = Lazy::new(|| {
    [
        (CardIssuer::Naranja, r"^589562\d{10}$"),
        (
            CardIssuer::Cabal,
            r"^(60420[1-9]|6042[1-9]\d|6043\d{2}|60440\d|589657|603522|650272|650087)\d{10}$",
        ),
        (CardIssuer::TarjetaSol, r"^504639\d{10}$"),
        (CardIssuer::Patagonia365, r"^504656\d{10}$"),
        (CardIssuer::Visa, r"^4\d{12}(\d{3})?(\d{3})?$"),
        (
            CardIssuer::Master,
            r"^(5[1-5]\d{4}|677189|222[1-9]\d{2}|22[3-9]\d{3}|2[3-6]\d{4}|27[01]\d{3}|2720\d{2})\d{10}$",
        ),
        (CardIssuer::AmericanExpress, r"^3[47]\d{13}$"),
        (CardIssuer::DinersClub, r"^3(0[0-5]|[68]\d)\d{11,16}$"),
        (CardIssuer::JCB, r"^(35(28|29|[3-8]\d)\d{12}|308800\d{10})$"),
        (CardIssuer::Discover, r"^(6011|65\d{2}|64[4-9]\d)\d{12,15}$"),
        (
            CardIssuer::Maestro,
            r"^(5018|5020|5038|5893|6304|6759|676[1-3])\d{8,15}$",
        ),
    ]
    .into_iter()
    .map(|(issuer, pattern)| {
        let regex = Regex::new(pattern)
            .map_err(|error| tracing::error!(?issuer, %error, "invalid card brand pattern"))
            .ok();
        (issuer, regex)
    })
    .collect()
});

/// Detects the brand of a card or network token number. `None` when no pattern matches.
pub fn get_card_issuer(card_number: &str) -> Option<CardIssuer> {
    let digits: String = card_number.split_whitespace().collect();
    CARD_REGEX
        .iter()
        .find(|(_, regex)| regex.as_ref().is_some_and(|regex| regex.is_match(&digits)))
        .map(|(issuer, _)| *issuer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_well_known_test_numbers() {
        assert_eq!(get_card_issuer("4111111111111111"), Some(CardIssuer::Visa));
        assert_eq!(get_card_issuer("5555555555554444"), Some(CardIssuer::Master));
        assert_eq!(get_card_issuer("2223000048400011"), Some(CardIssuer::Master));
        assert_eq!(
            get_card_issuer("378282246310005"),
            Some(CardIssuer::AmericanExpress)
        );
        assert_eq!(get_card_issuer("6011111111111117"), Some(CardIssuer::Discover));
        assert_eq!(get_card_issuer("36006666333344"), Some(CardIssuer::DinersClub));
        assert_eq!(get_card_issuer("3530111333300000"), Some(CardIssuer::JCB));
    }

    #[test]
    fn regional_brands_win_over_broad_ranges() {
        assert_eq!(get_card_issuer("5895627823453005"), Some(CardIssuer::Naranja));
        assert_eq!(get_card_issuer("5896570000000008"), Some(CardIssuer::Cabal));
        assert_eq!(get_card_issuer("6042012045809847"), Some(CardIssuer::Cabal));
        assert_eq!(get_card_issuer("5046390000000001"), Some(CardIssuer::TarjetaSol));
        assert_eq!(
            get_card_issuer("5046560000000007"),
            Some(CardIssuer::Patagonia365)
        );
        assert_eq!(get_card_issuer("6759000000000000"), Some(CardIssuer::Maestro));
    }

    #[test]
    fn unknown_prefix_has_no_brand() {
        assert_eq!(get_card_issuer("9999999999999999"), None);
        assert_eq!(get_card_issuer(""), None);
    }

    #[test]
    fn brand_names_are_snake_case() {
        assert_eq!(CardIssuer::AmericanExpress.to_string(), "american_express");
        assert_eq!(CardIssuer::Patagonia365.to_string(), "patagonia_365");
        assert_eq!(CardIssuer::JCB.to_string(), "jcb");
    }
}
