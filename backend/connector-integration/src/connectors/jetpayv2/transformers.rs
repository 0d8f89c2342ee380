use common_enums::{CountryAlpha3, Currency};
use common_utils::{
    generate_id_without_prefix, AmountConvertor, MinorUnit, StringMinorUnit,
    StringMinorUnitForConnector,
};
use domain_types::{
    connector_flow::{FlowOperation, Operation},
    connector_types::{
        PaymentFlowData, PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsResponseData, RefundsData, StandardErrorCode,
    },
    errors,
    payment_method_data::{Card, PaymentMethodData},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{Address, PaymentOptions},
    router_response_types::ResponseParams,
    utils::convert_back_amount_to_minor_units,
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};

use super::{
    requests::{
        JetpayBilling, JetpayCardNum, JetpayElement, JetpayIndustryInfo, JetpayRequest,
        JetpayShipping, JetpayTaxAmount, JetpayTransactionType, JetpayVersionedText, API_VERSION,
    },
    responses::JetpayResponse,
};
use crate::{types::ResponseRouterData, utils};

type Error = error_stack::Report<errors::ConnectorError>;

pub const DEFAULT_CURRENCY: Currency = Currency::USD;

const CONNECTOR_NAME: &str = "jetpayv2";
const TRANSACTION_ID_LENGTH: usize = 18;
const REFERENCE_DELIMITER: char = ';';
const NOT_APPLICABLE: &str = "n/a";

pub struct JetpayAuthType {
    pub(super) terminal_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for JetpayAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::HeaderKey { api_key } => Ok(Self {
                terminal_id: api_key.to_owned(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

/// `transaction_id;approval;amount;token`. Every segment is optional and keeps its position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JetpayAuthorization {
    pub transaction_id: Option<String>,
    pub approval: Option<String>,
    pub amount: Option<String>,
    pub token: Option<String>,
}

impl JetpayAuthorization {
    pub fn decode(reference: &str) -> Self {
        let [transaction_id, approval, amount, token] =
            utils::split_reference::<4>(reference, REFERENCE_DELIMITER);
        Self {
            transaction_id,
            approval,
            amount,
            token,
        }
    }

    pub fn encode(&self) -> String {
        utils::join_reference(
            &[
                self.transaction_id.as_deref(),
                self.approval.as_deref(),
                self.amount.as_deref(),
                self.token.as_deref(),
            ],
            REFERENCE_DELIMITER,
        )
    }

    fn require_transaction_id(&self) -> Result<String, Error> {
        self.transaction_id
            .clone()
            .ok_or(errors::ConnectorError::MissingConnectorTransactionID)
            .attach_printable("jetpay reference carries no transaction id")
    }

    /// The amount segment as minor units. An empty segment is zero.
    pub fn original_amount(&self) -> Result<MinorUnit, Error> {
        match &self.amount {
            None => Ok(MinorUnit::zero()),
            Some(amount) => convert_back_amount_to_minor_units(
                &StringMinorUnitForConnector,
                StringMinorUnit::from_raw(amount.as_str()),
                DEFAULT_CURRENCY,
            ),
        }
    }
}

/// What a request carries into the authorization reference of its response.
pub trait JetpayReferenceData {
    fn options(&self) -> &PaymentOptions;

    /// The amount echoed into the reference, if the operation has one.
    fn original_amount(&self) -> Result<Option<MinorUnit>, Error>;

    /// The token of the reference this call follows up on.
    fn previous_token(&self) -> Option<String> {
        None
    }
}

impl JetpayReferenceData for PaymentsAuthorizeData {
    fn options(&self) -> &PaymentOptions {
        &self.options
    }

    fn original_amount(&self) -> Result<Option<MinorUnit>, Error> {
        Ok(Some(self.minor_amount))
    }
}

impl JetpayReferenceData for PaymentsCaptureData {
    fn options(&self) -> &PaymentOptions {
        &self.options
    }

    fn original_amount(&self) -> Result<Option<MinorUnit>, Error> {
        Ok(Some(self.minor_amount_to_capture))
    }

    fn previous_token(&self) -> Option<String> {
        JetpayAuthorization::decode(&self.connector_authorization).token
    }
}

impl JetpayReferenceData for RefundsData {
    fn options(&self) -> &PaymentOptions {
        &self.options
    }

    fn original_amount(&self) -> Result<Option<MinorUnit>, Error> {
        Ok(Some(self.minor_refund_amount))
    }

    fn previous_token(&self) -> Option<String> {
        JetpayAuthorization::decode(&self.connector_authorization).token
    }
}

impl JetpayReferenceData for PaymentVoidData {
    fn options(&self) -> &PaymentOptions {
        &self.options
    }

    fn original_amount(&self) -> Result<Option<MinorUnit>, Error> {
        JetpayAuthorization::decode(&self.connector_authorization)
            .original_amount()
            .map(Some)
    }

    fn previous_token(&self) -> Option<String> {
        JetpayAuthorization::decode(&self.connector_authorization).token
    }
}

impl JetpayReferenceData for PaymentMethodTokenizationData {
    fn options(&self) -> &PaymentOptions {
        &self.options
    }

    fn original_amount(&self) -> Result<Option<MinorUnit>, Error> {
        Ok(None)
    }
}

pub struct JetpayRouterData<T> {
    pub amount: StringMinorUnit,
    pub tax_amount: Option<StringMinorUnit>,
    pub router_data: T,
}

impl<T> From<(StringMinorUnit, Option<StringMinorUnit>, T)> for JetpayRouterData<T> {
    fn from((amount, tax_amount, router_data): (StringMinorUnit, Option<StringMinorUnit>, T)) -> Self {
        Self {
            amount,
            tax_amount,
            router_data,
        }
    }
}

/// Assembles the children of `<JetPay>` in wire order.
struct JetpayRequestBuilder<'a> {
    options: &'a PaymentOptions,
    elements: Vec<JetpayElement>,
}

impl<'a> JetpayRequestBuilder<'a> {
    fn new(
        auth_type: &ConnectorAuthType,
        transaction_type: JetpayTransactionType,
        transaction_id: Option<String>,
        options: &'a PaymentOptions,
    ) -> Result<Self, Error> {
        let auth = JetpayAuthType::try_from(auth_type)?;
        let elements = vec![
            JetpayElement::TerminalId(auth.terminal_id),
            JetpayElement::TransactionType(transaction_type.into()),
            JetpayElement::TransactionId(
                transaction_id
                    .unwrap_or_else(|| generate_id_without_prefix(TRANSACTION_ID_LENGTH)),
            ),
            JetpayElement::Origin(
                options
                    .origin
                    .clone()
                    .unwrap_or_else(|| "INTERNET".to_string()),
            ),
            JetpayElement::IndustryInfo(JetpayIndustryInfo {
                industry_type: options
                    .industry_info
                    .clone()
                    .unwrap_or_else(|| "ECOMMERCE".to_string()),
            }),
            JetpayElement::Application(versioned(
                options.application.as_ref(),
                options.application_version.as_ref(),
            )),
            JetpayElement::Device(versioned(
                options.device.as_ref(),
                options.device_version.as_ref(),
            )),
            JetpayElement::Library(JetpayVersionedText {
                version: "1.5".to_string(),
                value: "VirtPOS SDK".to_string(),
            }),
            JetpayElement::Gateway("JetPay"),
            JetpayElement::DeveloperId(
                options
                    .developer_id
                    .clone()
                    .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            ),
        ];
        Ok(Self { options, elements })
    }

    fn push(mut self, element: JetpayElement) -> Self {
        self.elements.push(element);
        self
    }

    fn add_payment(self, payment_method_data: &PaymentMethodData) -> Result<Self, Error> {
        match payment_method_data {
            PaymentMethodData::Card(card) => self.add_credit_card(card),
            PaymentMethodData::StoredReference { reference } => {
                let reference = reference.peek();
                let token = if reference.contains(REFERENCE_DELIMITER) {
                    JetpayAuthorization::decode(reference).token
                } else {
                    Some(reference.clone())
                };
                Ok(self.add_token(token))
            }
            PaymentMethodData::NetworkToken(_) => Err(errors::ConnectorError::NotSupported {
                message: "Network token payments".to_string(),
                connector: CONNECTOR_NAME,
            }
            .into()),
        }
    }

    fn add_credit_card(self, card: &Card) -> Result<Self, Error> {
        let mut builder = self
            .push(JetpayElement::CardNum(JetpayCardNum {
                card_present: false,
                tokenize: true,
                number: card.card_number.clone(),
            }))
            .push(JetpayElement::CardExpMonth(card.get_expiry_month_2_digit()?))
            .push(JetpayElement::CardExpYear(card.get_card_expiry_year_2_digit()?));
        if let Some(name) = card
            .card_holder_name
            .as_ref()
            .filter(|name| !name.peek().trim().is_empty())
        {
            builder = builder.push(JetpayElement::CardName(name.clone()));
        }
        if let Some(cvc) = card.get_cvc() {
            builder = builder.push(JetpayElement::Cvv2(cvc));
        }
        Ok(builder)
    }

    fn add_token(self, token: Option<String>) -> Self {
        match token {
            Some(token) => self.push(JetpayElement::Token(Secret::new(token))),
            None => self,
        }
    }

    fn add_addresses(self) -> Self {
        let options = self.options;
        let mut builder = self;
        if let Some(billing) = &options.billing_address {
            builder = builder.push(JetpayElement::Billing(JetpayBilling {
                address: street(billing),
                city: billing.city.clone(),
                state_prov: billing.state.clone(),
                postal_code: billing.zip.clone(),
                country: country_code(billing),
                phone: billing.phone.clone(),
                email: options.email.clone(),
                customer_po: None,
            }));
        }
        if let Some(shipping) = &options.shipping_address {
            builder = builder.push(JetpayElement::Shipping(JetpayShipping {
                name: shipping.name.clone(),
                address: street(shipping),
                city: shipping.city.clone(),
                state_prov: shipping.state.clone(),
                postal_code: shipping.zip.clone(),
                country: country_code(shipping),
                phone: shipping.phone.clone(),
            }));
        }
        builder
    }

    fn add_customer_data(self) -> Self {
        match self.options.ip.clone() {
            Some(ip) => self.push(JetpayElement::UserIpAddress(ip)),
            None => self,
        }
    }

    fn add_invoice_data(self, tax_amount: Option<StringMinorUnit>) -> Self {
        let options = self.options;
        let mut builder = self;
        if let Some(order_id) = options.order_id.clone() {
            builder = builder.push(JetpayElement::OrderNumber(order_id));
        }
        if let Some(amount) = tax_amount {
            builder = builder.push(JetpayElement::TaxAmount(JetpayTaxAmount {
                exempt_ind: options.tax_exempt.unwrap_or(false),
                amount,
            }));
        }
        builder
    }

    fn add_purchase_order(self) -> Self {
        match self.options.purchase_order.clone() {
            Some(purchase_order) => self.push(JetpayElement::Billing(JetpayBilling {
                customer_po: Some(purchase_order),
                ..Default::default()
            })),
            None => self,
        }
    }

    fn add_user_defined_fields(self) -> Self {
        let options = self.options;
        let fields = [
            options.ud_field_1.clone().map(JetpayElement::UdField1),
            options.ud_field_2.clone().map(JetpayElement::UdField2),
            options.ud_field_3.clone().map(JetpayElement::UdField3),
        ];
        fields.into_iter().flatten().fold(self, Self::push)
    }

    fn total_amount(self, amount: StringMinorUnit) -> Self {
        self.push(JetpayElement::TotalAmount(amount))
    }

    fn build(self) -> JetpayRequest {
        JetpayRequest {
            version: API_VERSION,
            elements: self.elements,
        }
    }
}

fn versioned(value: Option<&String>, version: Option<&String>) -> JetpayVersionedText {
    JetpayVersionedText {
        version: version.cloned().unwrap_or_else(|| "1.0".to_string()),
        value: value.cloned().unwrap_or_else(|| NOT_APPLICABLE.to_string()),
    }
}

fn street(address: &Address) -> Option<Secret<String>> {
    let lines = [address.address1.as_ref(), address.address2.as_ref()]
        .into_iter()
        .flatten()
        .map(|line| line.peek().as_str())
        .collect::<Vec<_>>();
    (!lines.is_empty()).then(|| Secret::new(lines.join(" ")))
}

fn country_code(address: &Address) -> Option<String> {
    address
        .country
        .map(|country| CountryAlpha3::from(country).to_string())
}

fn direct_charge<F>(
    item: &JetpayRouterData<&RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>,
    transaction_type: JetpayTransactionType,
) -> Result<JetpayRequest, Error> {
    let router_data = item.router_data;
    let request = &router_data.request;
    Ok(JetpayRequestBuilder::new(
        &router_data.connector_auth_type,
        transaction_type,
        None,
        &request.options,
    )?
    .add_payment(&request.payment_method_data)?
    .add_addresses()
    .add_customer_data()
    .add_invoice_data(item.tax_amount.clone())
    .add_user_defined_fields()
    .total_amount(item.amount.clone())
    .build())
}

impl<F>
    TryFrom<
        (
            &JetpayRouterData<
                &RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
            >,
            JetpayTransactionType,
        ),
    > for JetpayRequest
{
    type Error = Error;

    fn try_from(
        (item, transaction_type): (
            &JetpayRouterData<
                &RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
            >,
            JetpayTransactionType,
        ),
    ) -> Result<Self, Self::Error> {
        match transaction_type {
            JetpayTransactionType::Credit => credit_request(item),
            _ => direct_charge(item, transaction_type),
        }
    }
}

impl<F>
    TryFrom<
        &JetpayRouterData<&RouterDataV2<F, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>,
    > for JetpayRequest
{
    type Error = Error;

    fn try_from(
        item: &JetpayRouterData<
            &RouterDataV2<F, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let request = &router_data.request;
        let reference = JetpayAuthorization::decode(&request.connector_authorization);
        Ok(JetpayRequestBuilder::new(
            &router_data.connector_auth_type,
            JetpayTransactionType::Capt,
            Some(reference.require_transaction_id()?),
            &request.options,
        )?
        .add_invoice_data(item.tax_amount.clone())
        .add_purchase_order()
        .add_user_defined_fields()
        .total_amount(item.amount.clone())
        .build())
    }
}

impl<F>
    TryFrom<&JetpayRouterData<&RouterDataV2<F, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>>
    for JetpayRequest
{
    type Error = Error;

    fn try_from(
        item: &JetpayRouterData<
            &RouterDataV2<F, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let request = &router_data.request;
        let reference = JetpayAuthorization::decode(&request.connector_authorization);
        Ok(JetpayRequestBuilder::new(
            &router_data.connector_auth_type,
            JetpayTransactionType::Void,
            Some(reference.require_transaction_id()?),
            &request.options,
        )?
        .total_amount(item.amount.clone())
        .build())
    }
}

/// A refund is a `CREDIT` against the original transaction, paid back to its token.
impl<F>
    TryFrom<&JetpayRouterData<&RouterDataV2<F, PaymentFlowData, RefundsData, PaymentsResponseData>>>
    for JetpayRequest
{
    type Error = Error;

    fn try_from(
        item: &JetpayRouterData<&RouterDataV2<F, PaymentFlowData, RefundsData, PaymentsResponseData>>,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let request = &router_data.request;
        let reference = JetpayAuthorization::decode(&request.connector_authorization);
        Ok(JetpayRequestBuilder::new(
            &router_data.connector_auth_type,
            JetpayTransactionType::Credit,
            Some(reference.require_transaction_id()?),
            &request.options,
        )?
        .add_token(reference.token)
        .add_invoice_data(item.tax_amount.clone())
        .add_addresses()
        .add_customer_data()
        .add_user_defined_fields()
        .total_amount(item.amount.clone())
        .build())
    }
}

/// An unreferenced `CREDIT` straight to an instrument.
fn credit_request<F>(
    item: &JetpayRouterData<&RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>,
) -> Result<JetpayRequest, Error> {
    let router_data = item.router_data;
    let request = &router_data.request;
    Ok(JetpayRequestBuilder::new(
        &router_data.connector_auth_type,
        JetpayTransactionType::Credit,
        None,
        &request.options,
    )?
    .add_payment(&request.payment_method_data)?
    .add_invoice_data(item.tax_amount.clone())
    .add_addresses()
    .add_customer_data()
    .add_user_defined_fields()
    .total_amount(item.amount.clone())
    .build())
}

impl<F>
    TryFrom<&RouterDataV2<F, PaymentFlowData, PaymentMethodTokenizationData, PaymentsResponseData>>
    for JetpayRequest
{
    type Error = Error;

    fn try_from(
        router_data: &RouterDataV2<
            F,
            PaymentFlowData,
            PaymentMethodTokenizationData,
            PaymentsResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let request = &router_data.request;
        Ok(JetpayRequestBuilder::new(
            &router_data.connector_auth_type,
            JetpayTransactionType::Tokenize,
            None,
            &request.options,
        )?
        .add_payment(&request.payment_method_data)?
        .add_addresses()
        .add_customer_data()
        .build())
    }
}

impl<F, Req>
    TryFrom<ResponseRouterData<JetpayResponse, RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>>>
    for RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>
where
    F: FlowOperation,
    Req: JetpayReferenceData,
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            JetpayResponse,
            RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;

        let authorization = if F::OPERATION == Operation::Store {
            response.token.clone()
        } else {
            let amount = router_data
                .request
                .original_amount()?
                .map(|amount| {
                    StringMinorUnitForConnector.convert(
                        amount,
                        router_data.request.options().get_currency_or(DEFAULT_CURRENCY),
                    )
                })
                .transpose()
                .change_context(errors::ConnectorError::AmountConversionFailed)?;
            Some(
                JetpayAuthorization {
                    transaction_id: response.transaction_id.clone(),
                    approval: response.approval.clone(),
                    amount: amount.map(|amount| amount.get_amount_as_string()),
                    token: response
                        .token
                        .clone()
                        .or_else(|| router_data.request.previous_token()),
                }
                .encode(),
            )
        };

        let outcome = if response.is_success() {
            Ok(PaymentsResponseData {
                message: "APPROVED".to_string(),
                authorization,
                avs_result: response.avs.clone(),
                cvv_result: response.cvv2.clone(),
            })
        } else {
            Err(ErrorResponse {
                code: response
                    .action_code
                    .clone()
                    .unwrap_or_else(|| StandardErrorCode::ProcessingError.to_string()),
                message: response.error_message(),
                reason: response.response_text.clone(),
                status_code: http_code,
                connector_transaction_id: authorization,
                avs_result: response.avs.clone(),
                cvv_result: response.cvv2.clone(),
            })
        };

        Ok(router_data.set_response(outcome))
    }
}

/// Reads the body of a JetPay response, degrading to a diagnostic mapping when it is not XML.
pub fn parse_response(body: &[u8]) -> ResponseParams {
    utils::parse_xml_params(body, "JetPay")
}

pub fn serialize_request(request: &JetpayRequest) -> Result<String, Error> {
    utils::serialize_to_xml_string_with_root("JetPay", request)
}
