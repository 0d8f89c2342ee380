use common_enums::{CountryAlpha2, Currency};
use common_utils::{pii::IpAddress, Email, MinorUnit};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

/// Optional per-call parameters. Absent members are never sent to the connector.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentOptions {
    pub order_id: Option<String>,
    pub description: Option<String>,
    pub email: Option<Email>,
    pub currency: Option<Currency>,
    pub ip: Option<Secret<String, IpAddress>>,

    pub installments: Option<u32>,
    pub payment_type: Option<String>,
    pub wallet_id: Option<String>,
    pub establishment_name: Option<String>,
    pub site_id: Option<String>,
    pub payment_method_id: Option<u32>,
    pub debit: bool,

    pub card_holder_identification_type: Option<String>,
    pub card_holder_identification_number: Option<Secret<String>>,
    pub card_holder_door_number: Option<i64>,
    pub card_holder_birthday: Option<Secret<String>>,
    /// Last four digits of the underlying card, for network token payments.
    pub last_4: Option<String>,

    pub fraud_detection: Option<FraudDetection>,
    pub aggregate_data: Option<AggregateData>,
    pub sub_payments: Vec<SubPayment>,

    pub customer_id: Option<String>,
    pub customer_email: Option<Email>,

    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,

    pub tax_amount: Option<MinorUnit>,
    pub tax_exempt: Option<bool>,
    pub purchase_order: Option<String>,

    pub ud_field_1: Option<String>,
    pub ud_field_2: Option<String>,
    pub ud_field_3: Option<String>,

    pub origin: Option<String>,
    pub industry_info: Option<String>,
    pub application: Option<String>,
    pub application_version: Option<String>,
    pub device: Option<String>,
    pub device_version: Option<String>,
    pub developer_id: Option<String>,
}

impl PaymentOptions {
    pub fn get_currency_or(&self, default: Currency) -> Currency {
        self.currency.unwrap_or(default)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudDetection {
    pub send_to_cs: Option<bool>,
    pub channel: Option<String>,
    pub dispatch_method: Option<String>,
    pub csmdds: Option<serde_json::Value>,
    pub device_unique_id: Option<String>,
    pub bill_to: Option<serde_json::Value>,
    pub purchase_totals: Option<serde_json::Value>,
    pub customer_in_site: Option<serde_json::Value>,
    pub retail_transaction_data: Option<serde_json::Value>,
    pub ship_to: Option<serde_json::Value>,
    pub tax_voucher_required: Option<bool>,
    pub copy_paste_card_data: Option<serde_json::Value>,
}

/// Sub-merchant data for payment facilitators.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateData {
    pub indicator: Option<String>,
    pub identification_number: Option<String>,
    pub bill_to_pay: Option<String>,
    pub bill_to_refund: Option<String>,
    pub merchant_name: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub postal_code: Option<String>,
    pub category: Option<String>,
    pub channel: Option<String>,
    pub geographic_code: Option<String>,
    pub city: Option<String>,
    pub merchant_id: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub merchant_email: Option<String>,
    pub merchant_phone: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubPayment {
    pub site_id: String,
    pub installments: u32,
    pub amount: MinorUnit,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub name: Option<Secret<String>>,
    pub address1: Option<Secret<String>>,
    pub address2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<CountryAlpha2>,
    pub phone: Option<Secret<String>>,
}
