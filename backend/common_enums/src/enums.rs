/// The three-letter ISO 4217 currency code of the payment amount.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    ARS,
    BOB,
    BRL,
    CAD,
    CLP,
    COP,
    EUR,
    GBP,
    JPY,
    MXN,
    PEN,
    PYG,
    #[default]
    USD,
    UYU,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[rustfmt::skip]
pub enum CountryAlpha2 {
    AR, AU, BE, BO, BR, CA, CH, CL, CO, CR,
    DE, DO, EC, ES, FR, GB, GT, IE, IT, JP,
    MX, NL, PA, PE, PR, PT, PY, SV, UY, VE,
    #[default]
    US
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[rustfmt::skip]
pub enum CountryAlpha3 {
    ARG, AUS, BEL, BOL, BRA, CAN, CHE, CHL, COL, CRI,
    DEU, DOM, ECU, ESP, FRA, GBR, GTM, IRL, ITA, JPN,
    MEX, NLD, PAN, PER, PRI, PRT, PRY, SLV, URY, VEN,
    USA
}

impl From<CountryAlpha2> for CountryAlpha3 {
    fn from(country: CountryAlpha2) -> Self {
        match country {
            CountryAlpha2::AR => Self::ARG,
            CountryAlpha2::AU => Self::AUS,
            CountryAlpha2::BE => Self::BEL,
            CountryAlpha2::BO => Self::BOL,
            CountryAlpha2::BR => Self::BRA,
            CountryAlpha2::CA => Self::CAN,
            CountryAlpha2::CH => Self::CHE,
            CountryAlpha2::CL => Self::CHL,
            CountryAlpha2::CO => Self::COL,
            CountryAlpha2::CR => Self::CRI,
            CountryAlpha2::DE => Self::DEU,
            CountryAlpha2::DO => Self::DOM,
            CountryAlpha2::EC => Self::ECU,
            CountryAlpha2::ES => Self::ESP,
            CountryAlpha2::FR => Self::FRA,
            CountryAlpha2::GB => Self::GBR,
            CountryAlpha2::GT => Self::GTM,
            CountryAlpha2::IE => Self::IRL,
            CountryAlpha2::IT => Self::ITA,
            CountryAlpha2::JP => Self::JPN,
            CountryAlpha2::MX => Self::MEX,
            CountryAlpha2::NL => Self::NLD,
            CountryAlpha2::PA => Self::PAN,
            CountryAlpha2::PE => Self::PER,
            CountryAlpha2::PR => Self::PRI,
            CountryAlpha2::PT => Self::PRT,
            CountryAlpha2::PY => Self::PRY,
            CountryAlpha2::SV => Self::SLV,
            CountryAlpha2::UY => Self::URY,
            CountryAlpha2::VE => Self::VEN,
            CountryAlpha2::US => Self::USA,
        }
    }
}
