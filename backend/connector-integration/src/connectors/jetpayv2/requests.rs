use common_utils::{pii::IpAddress, StringMinorUnit};
use hyperswitch_masking::Secret;
use serde::Serialize;

pub const API_VERSION: &str = "2.2";

/// `<JetPay Version="2.2">` followed by its children in wire order.
#[derive(Debug, Serialize)]
#[serde(rename = "JetPay")]
pub struct JetpayRequest {
    #[serde(rename = "@Version")]
    pub version: &'static str,
    #[serde(rename = "$value")]
    pub elements: Vec<JetpayElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum JetpayTransactionType {
    Sale,
    Authonly,
    Capt,
    Void,
    Credit,
    Tokenize,
}

#[derive(Debug, Serialize)]
pub enum JetpayElement {
    #[serde(rename = "TerminalID")]
    TerminalId(Secret<String>),
    TransactionType(&'static str),
    #[serde(rename = "TransactionID")]
    TransactionId(String),
    Origin(String),
    IndustryInfo(JetpayIndustryInfo),
    Application(JetpayVersionedText),
    Device(JetpayVersionedText),
    Library(JetpayVersionedText),
    Gateway(&'static str),
    #[serde(rename = "DeveloperID")]
    DeveloperId(String),
    CardNum(JetpayCardNum),
    CardExpMonth(Secret<String>),
    CardExpYear(Secret<String>),
    CardName(Secret<String>),
    #[serde(rename = "CVV2")]
    Cvv2(Secret<String>),
    Token(Secret<String>),
    Billing(JetpayBilling),
    Shipping(JetpayShipping),
    #[serde(rename = "UserIPAddress")]
    UserIpAddress(Secret<String, IpAddress>),
    OrderNumber(String),
    TaxAmount(JetpayTaxAmount),
    #[serde(rename = "UDField1")]
    UdField1(String),
    #[serde(rename = "UDField2")]
    UdField2(String),
    #[serde(rename = "UDField3")]
    UdField3(String),
    TotalAmount(StringMinorUnit),
}

#[derive(Debug, Serialize)]
pub struct JetpayIndustryInfo {
    #[serde(rename = "@Type")]
    pub industry_type: String,
}

#[derive(Debug, Serialize)]
pub struct JetpayVersionedText {
    #[serde(rename = "@Version")]
    pub version: String,
    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct JetpayCardNum {
    #[serde(rename = "@CardPresent")]
    pub card_present: bool,
    #[serde(rename = "@Tokenize")]
    pub tokenize: bool,
    #[serde(rename = "$text")]
    pub number: cards::CardNumber,
}

#[derive(Debug, Serialize)]
pub struct JetpayTaxAmount {
    #[serde(rename = "@ExemptInd")]
    pub exempt_ind: bool,
    #[serde(rename = "$text")]
    pub amount: StringMinorUnit,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JetpayBilling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_prov: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<common_utils::Email>,
    #[serde(rename = "CustomerPO", skip_serializing_if = "Option::is_none")]
    pub customer_po: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JetpayShipping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_prov: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Secret<String>>,
}
