use std::collections::HashMap;

use cards::CardIssuer;
use common_enums::Currency;
use common_utils::{consts, Email, MinorUnit};
use domain_types::{
    connector_flow::{FlowOperation, Operation},
    connector_types::{
        PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData, StandardErrorCode,
    },
    errors,
    payment_method_data::{Card, NetworkTokenData, PaymentMethodData},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{AggregateData, FraudDetection, PaymentOptions},
    router_response_types::ResponseParams,
};
use error_stack::ResultExt;
use hyperswitch_masking::Secret;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{types::ResponseRouterData, utils};

type Error = error_stack::Report<errors::ConnectorError>;

pub const DEFAULT_CURRENCY: Currency = Currency::ARS;

/// `payment_method_id` sent when the brand is not in the table.
const FALLBACK_PAYMENT_METHOD_ID: u32 = 1;

const APPROVED_STATUSES: [&str; 2] = ["approved", "pre_approved"];

pub struct DecidirAuthType {
    pub(super) api_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for DecidirAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::HeaderKey { api_key } => Ok(Self {
                api_key: api_key.to_owned(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

pub struct DecidirRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> From<(MinorUnit, T)> for DecidirRouterData<T> {
    fn from((amount, router_data): (MinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

/// Returns the Decidir payment method id for a card brand, credit or debit.
pub fn payment_method_id_for(issuer: Option<CardIssuer>, debit: bool) -> u32 {
    match (issuer, debit) {
        (Some(CardIssuer::Visa), false) => 1,
        (Some(CardIssuer::Visa), true) => 31,
        (Some(CardIssuer::Master), false) => 104,
        (Some(CardIssuer::Master), true) => 105,
        (Some(CardIssuer::Maestro), _) => 106,
        (Some(CardIssuer::Cabal), false) => 63,
        (Some(CardIssuer::Cabal), true) => 108,
        (Some(CardIssuer::AmericanExpress), _) => 65,
        (Some(CardIssuer::DinersClub), _) => 8,
        (Some(CardIssuer::Naranja), _) => 24,
        (Some(CardIssuer::Patagonia365), _) => 55,
        (Some(CardIssuer::TarjetaSol), _) => 64,
        (Some(CardIssuer::Discover), _) => 139,
        (Some(CardIssuer::JCB), _) | (None, _) => FALLBACK_PAYMENT_METHOD_ID,
    }
}

#[derive(Debug, Serialize)]
pub struct DecidirPaymentsRequest {
    payment_method_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_transaction_id: Option<String>,
    bin: String,
    payment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    wallet_id: Option<String>,
    installments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    establishment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fraud_detection: Option<DecidirFraudDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_id: Option<String>,
    amount: MinorUnit,
    currency: Currency,
    card_data: DecidirCardData,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_tokenized_payment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_card_data: Option<DecidirTokenCardData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate_data: Option<DecidirAggregateData>,
    sub_payments: Vec<DecidirSubPayment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<DecidirCustomer>,
}

#[derive(Debug, Default, Serialize)]
pub struct DecidirFraudDetection {
    #[serde(skip_serializing_if = "Option::is_none")]
    send_to_cs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dispatch_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    csmdds: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_unique_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bill_to: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purchase_totals: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_in_site: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retail_transaction_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ship_to: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax_voucher_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copy_paste_card_data: Option<Value>,
    /// Only set for network token payments, which are never sent to CyberSource.
    #[serde(skip_serializing_if = "Option::is_none")]
    sent_to_cs: Option<bool>,
}

fn present_value(value: Option<&Value>) -> Option<Value> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        other => Some(other.clone()),
    }
}

fn present_string(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.is_empty()).cloned()
}

impl From<&FraudDetection> for DecidirFraudDetection {
    fn from(fraud: &FraudDetection) -> Self {
        Self {
            send_to_cs: fraud.send_to_cs,
            channel: present_string(fraud.channel.as_ref()),
            dispatch_method: present_string(fraud.dispatch_method.as_ref()),
            csmdds: present_value(fraud.csmdds.as_ref()),
            device_unique_id: present_string(fraud.device_unique_id.as_ref()),
            bill_to: present_value(fraud.bill_to.as_ref()),
            purchase_totals: present_value(fraud.purchase_totals.as_ref()),
            customer_in_site: present_value(fraud.customer_in_site.as_ref()),
            retail_transaction_data: present_value(fraud.retail_transaction_data.as_ref()),
            ship_to: present_value(fraud.ship_to.as_ref()),
            tax_voucher_required: fraud.tax_voucher_required,
            copy_paste_card_data: present_value(fraud.copy_paste_card_data.as_ref()),
            sent_to_cs: None,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DecidirCardHolderIdentification {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    identification_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
pub struct DecidirDeviceFingerprint {
    device_unique_identifier: String,
}

#[derive(Debug, Default, Serialize)]
pub struct DecidirCardData {
    card_holder_identification: DecidirCardHolderIdentification,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_holder_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_holder_door_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_holder_birthday: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_four_digits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_number: Option<cards::CardNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_expiration_month: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_expiration_year: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fraud_detection: Option<DecidirDeviceFingerprint>,
}

#[derive(Debug, Serialize)]
pub struct DecidirTokenCardData {
    expiration_month: Secret<String>,
    expiration_year: Secret<String>,
    token: cards::NetworkToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    eci: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cryptogram: Option<Secret<String>>,
}

#[derive(Debug, Default, Serialize)]
pub struct DecidirAggregateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    indicator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identification_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bill_to_pay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bill_to_refund: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geographic_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_phone: Option<String>,
}

impl From<&AggregateData> for DecidirAggregateData {
    fn from(data: &AggregateData) -> Self {
        Self {
            indicator: data.indicator.clone(),
            identification_number: data.identification_number.clone(),
            bill_to_pay: data.bill_to_pay.clone(),
            bill_to_refund: data.bill_to_refund.clone(),
            merchant_name: data.merchant_name.clone(),
            street: data.street.clone(),
            number: data.number.clone(),
            postal_code: data.postal_code.clone(),
            category: data.category.clone(),
            channel: data.channel.clone(),
            geographic_code: data.geographic_code.clone(),
            city: data.city.clone(),
            merchant_id: data.merchant_id.clone(),
            province: data.province.clone(),
            country: data.country.clone(),
            merchant_email: data.merchant_email.clone(),
            merchant_phone: data.merchant_phone.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecidirSubPayment {
    site_id: String,
    installments: u32,
    amount: MinorUnit,
}

#[derive(Debug, Serialize)]
pub struct DecidirCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
}

fn card_holder_data(
    options: &PaymentOptions,
    card_holder_name: Option<&Secret<String>>,
) -> DecidirCardData {
    DecidirCardData {
        card_holder_identification: DecidirCardHolderIdentification {
            identification_type: options.card_holder_identification_type.clone(),
            number: options.card_holder_identification_number.clone(),
        },
        card_holder_name: card_holder_name.cloned(),
        card_holder_door_number: options.card_holder_door_number,
        card_holder_birthday: options.card_holder_birthday.clone(),
        ..Default::default()
    }
}

fn customer_from(options: &PaymentOptions) -> Option<DecidirCustomer> {
    if options.customer_id.is_none() && options.customer_email.is_none() {
        return None;
    }
    Some(DecidirCustomer {
        id: options.customer_id.clone(),
        email: options.customer_email.clone(),
    })
}

/// The instrument-specific parts of a payment request.
struct InstrumentFragment {
    bin: String,
    issuer: Option<CardIssuer>,
    card_data: DecidirCardData,
    is_tokenized_payment: Option<bool>,
    token_card_data: Option<DecidirTokenCardData>,
}

fn card_fragment(card: &Card, options: &PaymentOptions) -> Result<InstrumentFragment, Error> {
    let mut card_data = card_holder_data(options, card.card_holder_name.as_ref());
    card_data.card_number = Some(card.card_number.clone());
    card_data.card_expiration_month = Some(card.get_expiry_month_2_digit()?);
    card_data.card_expiration_year = Some(card.get_card_expiry_year_2_digit()?);
    card_data.security_code = card.get_cvc();
    card_data.fraud_detection = options
        .fraud_detection
        .as_ref()
        .and_then(|fraud| present_string(fraud.device_unique_id.as_ref()))
        .map(|device_unique_identifier| DecidirDeviceFingerprint {
            device_unique_identifier,
        });

    Ok(InstrumentFragment {
        bin: card.card_number.get_card_isin(),
        issuer: card.get_card_issuer(),
        card_data,
        is_tokenized_payment: None,
        token_card_data: None,
    })
}

fn network_token_fragment(
    token: &NetworkTokenData,
    options: &PaymentOptions,
) -> Result<InstrumentFragment, Error> {
    let mut card_data = card_holder_data(options, token.card_holder_name.as_ref());
    card_data.last_four_digits = options.last_4.clone();
    card_data.security_code = token.get_cvc();

    Ok(InstrumentFragment {
        bin: token.token_number.get_card_isin(),
        issuer: token.get_card_issuer(),
        card_data,
        is_tokenized_payment: Some(true),
        token_card_data: Some(DecidirTokenCardData {
            expiration_month: token.get_expiry_month_2_digit()?,
            expiration_year: token.get_expiry_year_2_digit()?,
            token: token.token_number.clone(),
            eci: token.eci.clone(),
            cryptogram: token.token_cryptogram.clone(),
        }),
    })
}

impl<F>
    TryFrom<
        &DecidirRouterData<
            &RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for DecidirPaymentsRequest
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &DecidirRouterData<
            &RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let options = &request.options;

        let fragment = match &request.payment_method_data {
            PaymentMethodData::Card(card) => card_fragment(card, options)?,
            PaymentMethodData::NetworkToken(token) => network_token_fragment(token, options)?,
            PaymentMethodData::StoredReference { .. } => Err(errors::ConnectorError::NotSupported {
                message: "Stored reference payments".to_string(),
                connector: "decidir",
            })?,
        };

        let mut fraud_detection = options
            .fraud_detection
            .as_ref()
            .map(DecidirFraudDetection::from);
        if fragment.is_tokenized_payment.is_some() {
            fraud_detection.get_or_insert_with(Default::default).sent_to_cs = Some(false);
        }

        Ok(Self {
            payment_method_id: options
                .payment_method_id
                .unwrap_or_else(|| payment_method_id_for(fragment.issuer, options.debit)),
            site_transaction_id: options.order_id.clone(),
            bin: fragment.bin,
            payment_type: options
                .payment_type
                .clone()
                .unwrap_or_else(|| "single".to_string()),
            wallet_id: options.wallet_id.clone(),
            installments: options.installments.unwrap_or(1),
            description: options.description.clone(),
            email: options.email.clone(),
            establishment_name: options.establishment_name.clone(),
            fraud_detection,
            site_id: options.site_id.clone(),
            amount: item.amount,
            currency: options.get_currency_or(DEFAULT_CURRENCY),
            card_data: fragment.card_data,
            is_tokenized_payment: fragment.is_tokenized_payment,
            token_card_data: fragment.token_card_data,
            aggregate_data: options
                .aggregate_data
                .as_ref()
                .map(DecidirAggregateData::from),
            sub_payments: options
                .sub_payments
                .iter()
                .map(|sub_payment| DecidirSubPayment {
                    site_id: sub_payment.site_id.clone(),
                    installments: sub_payment.installments,
                    amount: sub_payment.amount,
                })
                .collect(),
            customer: customer_from(options),
        })
    }
}

/// Body of capture and refund calls. A void is a refund without an amount.
#[derive(Debug, Default, Serialize)]
pub struct DecidirAmountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<MinorUnit>,
}

impl DecidirAmountRequest {
    pub fn new(amount: MinorUnit) -> Self {
        Self {
            amount: Some(amount),
        }
    }
}

static STANDARD_ERROR_CODE_MAPPING: Lazy<HashMap<i64, StandardErrorCode>> = Lazy::new(|| {
    use StandardErrorCode::*;
    HashMap::from([
        (-1, ProcessingError),
        (1, CallIssuer),
        (2, CallIssuer),
        (3, ConfigError),
        (4, PickupCard),
        (5, CardDeclined),
        (7, PickupCard),
        (12, ProcessingError),
        (14, InvalidNumber),
        (28, ProcessingError),
        (38, IncorrectPin),
        (39, InvalidNumber),
        (43, PickupCard),
        (45, CardDeclined),
        (46, InvalidNumber),
        (47, CardDeclined),
        (48, CardDeclined),
        (49, InvalidExpiryDate),
        (51, CardDeclined),
        (53, CardDeclined),
        (54, ExpiredCard),
        (55, IncorrectPin),
        (56, CardDeclined),
        (57, CardDeclined),
        (76, CallIssuer),
        (91, CallIssuer),
        (96, ProcessingError),
        (97, ProcessingError),
    ])
});

pub fn standard_error_code(reason_id: i64) -> StandardErrorCode {
    STANDARD_ERROR_CODE_MAPPING
        .get(&reason_id)
        .copied()
        .unwrap_or(StandardErrorCode::ProcessingError)
}

#[derive(Debug, Default, Deserialize)]
pub struct DecidirReason {
    #[serde(default, deserialize_with = "utils::lenient_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "utils::lenient_string")]
    pub description: Option<String>,
}

impl DecidirReason {
    fn error_code(&self) -> String {
        match self.id {
            Some(id) => format!("{id}, {}", standard_error_code(id)),
            None => StandardErrorCode::ProcessingError.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DecidirStatusError {
    #[serde(rename = "type", default, deserialize_with = "utils::lenient_string")]
    pub error_type: Option<String>,
    #[serde(default, deserialize_with = "utils::lenient")]
    pub reason: Option<DecidirReason>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecidirStatusDetails {
    #[serde(default, deserialize_with = "utils::lenient")]
    pub error: Option<DecidirStatusError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecidirValidationError {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub param: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecidirErrorBody {
    #[serde(default, deserialize_with = "utils::lenient_string")]
    pub error_type: Option<String>,
    #[serde(default, deserialize_with = "utils::lenient")]
    pub validation_errors: Option<Vec<DecidirValidationError>>,
    #[serde(default, deserialize_with = "utils::lenient")]
    pub reason: Option<DecidirReason>,
}

/// Every shape Decidir answers with: payments, refunds, and the three error layouts.
///
/// Fields are read one by one, so a field of an unexpected type is dropped on its own.
#[derive(Debug, Default, Deserialize)]
pub struct DecidirPaymentsResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "utils::lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "utils::lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "utils::lenient")]
    pub status_details: Option<DecidirStatusDetails>,
    #[serde(default, deserialize_with = "utils::lenient_string")]
    pub error_type: Option<String>,
    /// A list of `{code, param}` or a map of field to message.
    #[serde(default)]
    pub validation_errors: Option<Value>,
    #[serde(default, deserialize_with = "utils::lenient")]
    pub error: Option<DecidirErrorBody>,
}

fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl DecidirPaymentsResponse {
    pub fn from_params(params: &ResponseParams) -> Self {
        serde_json::from_value(Value::Object(params.clone())).unwrap_or_else(|error| {
            tracing::warn!(%error, "unrecognized decidir response layout");
            Self::default()
        })
    }

    /// An inquiry only reports on the payment, so a rejected payment still answers the call.
    pub fn is_success(&self, operation: Operation) -> bool {
        self.status.as_deref().is_some_and(|status| {
            APPROVED_STATUSES.contains(&status)
                || (operation == Operation::Inquire && status == "rejected")
        })
    }

    pub fn authorization(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::Null => None,
            id => Some(render(Some(id))),
        }
    }

    pub fn success_message(&self) -> String {
        self.status.clone().unwrap_or_default()
    }

    pub fn error_message(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        if let Some(error) = self.status_details.as_ref().and_then(|d| d.error.as_ref()) {
            let description = error
                .reason
                .as_ref()
                .and_then(|reason| reason.description.clone())
                .unwrap_or_default();
            return Some(format!(
                "{description} | {}",
                error.error_type.clone().unwrap_or_default()
            ));
        }
        let error_type = self.error_type.as_ref()?;
        let message = match &self.validation_errors {
            Some(Value::Array(errors)) => errors
                .iter()
                .map(|error| {
                    format!("{}: {}", render(error.get("code")), render(error.get("param")))
                })
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::Object(errors)) => format!(
                "{error_type} - {}",
                errors
                    .iter()
                    .map(|(field, error)| format!("{field}: {}", render(Some(error))))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            _ => error_type.clone(),
        };
        Some(message)
    }

    /// Error shapes are checked in a fixed order and the first match wins.
    pub fn error_code(&self) -> String {
        if let Some(error) = self.status_details.as_ref().and_then(|d| d.error.as_ref()) {
            return error
                .reason
                .as_ref()
                .map(DecidirReason::error_code)
                .unwrap_or_else(|| StandardErrorCode::ProcessingError.to_string());
        }
        if let Some(error_type) = &self.error_type {
            if self.validation_errors.is_some() {
                return error_type.clone();
            }
        } else if let Some(error) = &self.error {
            if let Some(validation_errors) = &error.validation_errors {
                if let Some(error_type) = &error.error_type {
                    let first = validation_errors.first();
                    return format!(
                        "{error_type} | {} | {}",
                        render(first.and_then(|e| e.code.as_ref())),
                        render(first.and_then(|e| e.param.as_ref()))
                    );
                }
            } else if let Some(reason) = &error.reason {
                return reason.error_code();
            }
        }
        StandardErrorCode::ProcessingError.to_string()
    }
}

impl<F, Req>
    TryFrom<
        ResponseRouterData<
            DecidirPaymentsResponse,
            RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
        >,
    > for RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>
where
    F: FlowOperation,
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            DecidirPaymentsResponse,
            RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let authorization = response.authorization();

        let outcome = if response.is_success(F::OPERATION) {
            Ok(PaymentsResponseData {
                message: response.success_message(),
                authorization,
                avs_result: None,
                cvv_result: None,
            })
        } else {
            Err(ErrorResponse {
                code: response.error_code(),
                message: response
                    .error_message()
                    .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
                reason: response.error_type.clone(),
                status_code: http_code,
                connector_transaction_id: authorization,
                avs_result: None,
                cvv_result: None,
            })
        };

        Ok(router_data.set_response(outcome))
    }
}

/// Reads the body of a Decidir response, degrading to a diagnostic mapping when it is not JSON.
pub fn parse_response(body: &[u8]) -> ResponseParams {
    utils::parse_json_params(body, "Decidir")
}

pub fn get_payment_id(authorization: &str) -> Result<&str, Error> {
    let id = authorization.trim();
    if id.is_empty() {
        return Err(errors::ConnectorError::MissingConnectorTransactionID)
            .attach_printable("decidir follow-up without a payment id");
    }
    Ok(id)
}
