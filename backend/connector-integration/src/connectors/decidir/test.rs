#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use std::str::FromStr;

use common_utils::{request::Request, Email};
use domain_types::{
    connector_flow::{Authorize, Capture, Inquire, Purchase, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, PaymentsSyncData, RefundsData,
    },
    payment_method_data::{Card, NetworkTokenData, PaymentMethodData},
    router_data::ConnectorAuthType,
    router_request_types::{FraudDetection, PaymentOptions},
    types::Connectors,
};
use hyperswitch_masking::{ExposeInterface, Secret};
use serde_json::{json, Value};

use super::*;

fn card(number: &str) -> PaymentMethodData {
    PaymentMethodData::Card(Card {
        card_number: cards::CardNumber::from_str(number).unwrap(),
        card_exp_month: Secret::new("8".to_string()),
        card_exp_year: Secret::new("2030".to_string()),
        card_holder_name: Some(Secret::new("Jane Doe".to_string())),
        card_cvc: Some(Secret::new("123".to_string())),
    })
}

fn network_token() -> PaymentMethodData {
    PaymentMethodData::NetworkToken(NetworkTokenData {
        token_number: cards::NetworkToken::from_str("4012001037141112").unwrap(),
        token_exp_month: Secret::new("9".to_string()),
        token_exp_year: Secret::new("2032".to_string()),
        token_cryptogram: Some(Secret::new("/wBBBBBCd4HzpGYAmbmgguoBBBB=".to_string())),
        eci: Some("05".to_string()),
        card_holder_name: None,
        card_cvc: None,
    })
}

fn router_data<F, Req>(request: Req) -> RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData> {
    RouterDataV2::new(
        PaymentFlowData::new(Connectors::default(), true),
        ConnectorAuthType::HeaderKey {
            api_key: Secret::new("566f2e7b".to_string()),
        },
        request,
    )
}

fn payment(
    payment_method_data: PaymentMethodData,
    options: PaymentOptions,
) -> PaymentsAuthorizeData {
    PaymentsAuthorizeData {
        minor_amount: MinorUnit::new(1000),
        payment_method_data,
        options,
    }
}

fn build<F, Req>(router_data: &RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>) -> Request
where
    Decidir: ConnectorIntegrationV2<F, PaymentFlowData, Req, PaymentsResponseData>,
{
    Decidir::new().build_request_v2(router_data).unwrap().unwrap()
}

fn body_of(request: Request) -> Value {
    serde_json::from_str(&request.body.unwrap().get_inner_value().expose()).unwrap()
}

fn respond<F, Req>(
    router_data: &RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    status_code: u16,
    body: Value,
) -> RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>
where
    Decidir: ConnectorIntegrationV2<F, PaymentFlowData, Req, PaymentsResponseData>,
{
    Decidir::new()
        .handle_response_v2(
            router_data,
            Response {
                headers: None,
                response: bytes::Bytes::from(body.to_string()),
                status_code,
            },
        )
        .unwrap()
}

#[test]
fn purchase_sends_card_data_and_defaults() {
    let data = router_data::<Purchase, _>(payment(
        card("4507990000004905"),
        PaymentOptions {
            order_id: Some("X".to_string()),
            ..Default::default()
        },
    ));
    let request = build(&data);

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "https://developers.decidir.com/api/v2/payments");
    assert!(request.get_header("apikey").is_some());
    assert!(request.get_header("cache-control").is_some());

    let body = body_of(request);
    assert_eq!(body["payment_method_id"], 1);
    assert_eq!(body["site_transaction_id"], "X");
    assert_eq!(body["bin"], "450799");
    assert_eq!(body["payment_type"], "single");
    assert_eq!(body["installments"], 1);
    assert_eq!(body["amount"], 1000);
    assert_eq!(body["currency"], "ARS");
    assert_eq!(body["sub_payments"], json!([]));
    assert_eq!(body["card_data"]["card_number"], "4507990000004905");
    assert_eq!(body["card_data"]["card_expiration_month"], "08");
    assert_eq!(body["card_data"]["card_expiration_year"], "30");
    assert_eq!(body["card_data"]["security_code"], "123");
    assert_eq!(body["card_data"]["card_holder_name"], "Jane Doe");
    assert_eq!(body["card_data"]["card_holder_identification"], json!({}));

    for absent in ["wallet_id", "description", "email", "fraud_detection", "customer", "aggregate_data", "token_card_data", "is_tokenized_payment"] {
        assert!(body.get(absent).is_none(), "{absent} should be omitted");
    }
}

#[test]
fn optional_blocks_are_sent_when_present() {
    let data = router_data::<Purchase, _>(payment(
        card("5299910010000015"),
        PaymentOptions {
            debit: true,
            currency: Some(common_enums::Currency::USD),
            installments: Some(3),
            description: Some("Store purchase".to_string()),
            customer_id: Some("John".to_string()),
            customer_email: Some(Email::from_str("john@example.com").unwrap()),
            card_holder_identification_type: Some("dni".to_string()),
            card_holder_identification_number: Some(Secret::new("44567890".to_string())),
            card_holder_door_number: Some(1234),
            fraud_detection: Some(FraudDetection {
                send_to_cs: Some(false),
                channel: Some("Web".to_string()),
                dispatch_method: Some(String::new()),
                device_unique_id: Some("111".to_string()),
                csmdds: Some(json!([{ "code": 17, "description": "Campo MDD17" }])),
                ..Default::default()
            }),
            ..Default::default()
        },
    ));
    let body = body_of(build(&data));

    assert_eq!(body["payment_method_id"], 105);
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["installments"], 3);
    assert_eq!(body["description"], "Store purchase");
    assert_eq!(body["customer"], json!({ "id": "John", "email": "john@example.com" }));
    assert_eq!(
        body["card_data"]["card_holder_identification"],
        json!({ "type": "dni", "number": "44567890" })
    );
    assert_eq!(body["card_data"]["card_holder_door_number"], 1234);
    assert_eq!(
        body["card_data"]["fraud_detection"],
        json!({ "device_unique_identifier": "111" })
    );
    assert_eq!(body["fraud_detection"]["send_to_cs"], false);
    assert_eq!(body["fraud_detection"]["channel"], "Web");
    assert!(body["fraud_detection"].get("dispatch_method").is_none());
    assert_eq!(body["fraud_detection"]["csmdds"][0]["code"], 17);
}

#[test]
fn network_tokens_send_token_card_data() {
    let data = router_data::<Authorize, _>(payment(
        network_token(),
        PaymentOptions {
            last_4: Some("1112".to_string()),
            ..Default::default()
        },
    ));
    let body = body_of(build(&data));

    assert_eq!(body["is_tokenized_payment"], true);
    assert_eq!(body["fraud_detection"], json!({ "sent_to_cs": false }));
    assert_eq!(body["card_data"]["last_four_digits"], "1112");
    assert!(body["card_data"].get("card_number").is_none());
    assert_eq!(
        body["token_card_data"],
        json!({
            "expiration_month": "09",
            "expiration_year": "32",
            "token": "4012001037141112",
            "eci": "05",
            "cryptogram": "/wBBBBBCd4HzpGYAmbmgguoBBBB="
        })
    );
}

#[test]
fn payment_method_id_follows_brand_and_debit_flag() {
    use cards::CardIssuer;

    assert_eq!(transformers::payment_method_id_for(Some(CardIssuer::Visa), true), 31);
    assert_eq!(transformers::payment_method_id_for(Some(CardIssuer::Master), false), 104);
    assert_eq!(transformers::payment_method_id_for(Some(CardIssuer::Cabal), true), 108);
    assert_eq!(transformers::payment_method_id_for(Some(CardIssuer::Naranja), true), 24);
    assert_eq!(transformers::payment_method_id_for(Some(CardIssuer::JCB), false), 1);
    assert_eq!(transformers::payment_method_id_for(None, false), 1);

    let data = router_data::<Purchase, _>(payment(
        card("4507990000004905"),
        PaymentOptions {
            payment_method_id: Some(63),
            ..Default::default()
        },
    ));
    assert_eq!(body_of(build(&data))["payment_method_id"], 63);
}

#[test]
fn follow_up_requests_address_the_payment_id() {
    let capture = build(&router_data::<Capture, _>(PaymentsCaptureData {
        minor_amount_to_capture: MinorUnit::new(500),
        connector_authorization: "123".to_string(),
        options: PaymentOptions::default(),
    }));
    assert_eq!(capture.method, Method::Put);
    assert_eq!(capture.url, "https://developers.decidir.com/api/v2/payments/123");
    assert_eq!(body_of(capture), json!({ "amount": 500 }));

    let refund = build(&router_data::<Refund, _>(RefundsData {
        minor_refund_amount: MinorUnit::new(300),
        connector_authorization: "123".to_string(),
        options: PaymentOptions::default(),
    }));
    assert_eq!(refund.url, "https://developers.decidir.com/api/v2/payments/123/refunds");
    assert_eq!(body_of(refund), json!({ "amount": 300 }));

    let void = build(&router_data::<Void, _>(PaymentVoidData {
        connector_authorization: "123".to_string(),
        options: PaymentOptions::default(),
    }));
    assert_eq!(void.method, Method::Post);
    assert_eq!(void.url, "https://developers.decidir.com/api/v2/payments/123/refunds");
    assert_eq!(body_of(void), json!({}));

    let inquire = build(&router_data::<Inquire, _>(PaymentsSyncData {
        connector_authorization: "123".to_string(),
        options: PaymentOptions::default(),
    }));
    assert_eq!(inquire.method, Method::Get);
    assert!(inquire.body.is_none());
}

#[test]
fn follow_up_without_payment_id_is_rejected() {
    let data = router_data::<Void, _>(PaymentVoidData {
        connector_authorization: " ".to_string(),
        options: PaymentOptions::default(),
    });
    let error = Decidir::new().build_request_v2(&data).unwrap_err();
    assert_eq!(
        error.current_context(),
        &errors::ConnectorError::MissingConnectorTransactionID
    );
}

#[test]
fn approved_payment_is_successful() {
    let data = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));
    let result = respond(&data, 201, json!({ "id": 123, "status": "approved" }));

    let response = result.response.unwrap();
    assert_eq!(response.message, "approved");
    assert_eq!(response.authorization.as_deref(), Some("123"));
    assert_eq!(
        result.resource_common_data.raw_connector_response.unwrap()["status"],
        "approved"
    );
}

#[test]
fn rejected_status_only_succeeds_for_inquiries() {
    let body = json!({
        "id": 7719132,
        "status": "rejected",
        "status_details": {
            "error": {
                "type": "invalid_card",
                "reason": { "id": 5, "description": "Denied", "additional_description": "" }
            }
        }
    });

    let inquiry = router_data::<Inquire, _>(PaymentsSyncData {
        connector_authorization: "7719132".to_string(),
        options: PaymentOptions::default(),
    });
    assert_eq!(respond(&inquiry, 200, body.clone()).response.unwrap().message, "rejected");

    let purchase = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));
    let error = respond(&purchase, 402, body).response.unwrap_err();
    assert_eq!(error.code, "5, card_declined");
    assert_eq!(error.message, "Denied | invalid_card");
    assert_eq!(error.status_code, 402);
    assert_eq!(error.connector_transaction_id.as_deref(), Some("7719132"));
}

#[test]
fn validation_errors_are_rendered() {
    let purchase = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));

    let error = respond(
        &purchase,
        400,
        json!({
            "error_type": "invalid_request_error",
            "validation_errors": [
                { "code": "invalid_param", "param": "installments" },
                { "code": "invalid_param", "param": "bin" }
            ]
        }),
    )
    .response
    .unwrap_err();
    assert_eq!(error.message, "invalid_param: installments, invalid_param: bin");
    assert_eq!(error.code, "invalid_request_error");

    let error = respond(
        &purchase,
        400,
        json!({
            "error_type": "invalid_request_error",
            "validation_errors": { "status": "Invalid status" }
        }),
    )
    .response
    .unwrap_err();
    assert_eq!(error.message, "invalid_request_error - status: Invalid status");

    let error = respond(&purchase, 401, json!({ "error_type": "authentication_error" }))
        .response
        .unwrap_err();
    assert_eq!(error.message, "authentication_error");
    assert_eq!(error.code, "processing_error");
}

#[test]
fn nested_error_shapes_are_classified_in_order() {
    let purchase = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));

    let error = respond(
        &purchase,
        400,
        json!({
            "error": {
                "error_type": "invalid_request_error",
                "validation_errors": [{ "code": "invalid_param", "param": "payment_type" }]
            }
        }),
    )
    .response
    .unwrap_err();
    assert_eq!(error.code, "invalid_request_error | invalid_param | payment_type");
    assert_eq!(error.message, consts::NO_ERROR_MESSAGE);

    let error = respond(
        &purchase,
        402,
        json!({ "error": { "reason": { "id": 54, "description": "Expired" } } }),
    )
    .response
    .unwrap_err();
    assert_eq!(error.code, "54, expired_card");

    let error = respond(
        &purchase,
        402,
        json!({ "status": "rejected", "status_details": { "error": { "reason": { "id": 999 } } } }),
    )
    .response
    .unwrap_err();
    assert_eq!(error.code, "999, processing_error");

    let error = respond(&purchase, 500, json!({ "unexpected": true }))
        .response
        .unwrap_err();
    assert_eq!(error.code, "processing_error");
}

#[test]
fn mistyped_fields_keep_the_rest_of_the_response() {
    let purchase = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));

    let response = respond(
        &purchase,
        201,
        json!({ "id": 7719132, "status": "approved", "error": "oops" }),
    )
    .response
    .unwrap();
    assert_eq!(response.message, "approved");
    assert_eq!(response.authorization.as_deref(), Some("7719132"));

    let error = respond(
        &purchase,
        402,
        json!({
            "status": "rejected",
            "status_details": { "error": { "reason": { "id": "13", "description": "MONTO INVALIDO" } } }
        }),
    )
    .response
    .unwrap_err();
    assert_eq!(error.code, "13, processing_error");
    assert!(error.message.starts_with("MONTO INVALIDO"));
}

#[test]
fn explicit_message_wins() {
    let purchase = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));
    let error = respond(&purchase, 401, json!({ "message": "Invalid authentication credentials" }))
        .response
        .unwrap_err();
    assert_eq!(error.message, "Invalid authentication credentials");
}

#[test]
fn non_json_body_is_a_failed_result() {
    let purchase = router_data::<Purchase, _>(payment(card("4507990000004905"), PaymentOptions::default()));
    let result = Decidir::new()
        .handle_response_v2(
            &purchase,
            Response {
                headers: None,
                response: bytes::Bytes::from_static(b"<html>Bad Gateway</html>"),
                status_code: 502,
            },
        )
        .unwrap();

    let error = result.response.unwrap_err();
    assert!(error
        .message
        .starts_with("A non-JSON response was received from Decidir where one was expected."));
    assert_eq!(error.code, "processing_error");
}

#[test]
fn operations_follow_preauth_mode() {
    let decidir = Decidir::new();

    assert!(decidir.validate_operation(Operation::Purchase, false).is_ok());
    assert!(decidir.validate_operation(Operation::Purchase, true).is_err());
    assert!(decidir.validate_operation(Operation::Authorize, false).is_err());
    assert!(decidir.validate_operation(Operation::Authorize, true).is_ok());
    assert!(decidir.validate_operation(Operation::Capture, false).is_err());
    assert!(decidir.validate_operation(Operation::Verify, true).is_ok());
    assert!(decidir.validate_operation(Operation::Refund, true).is_ok());
    assert!(decidir.validate_operation(Operation::Void, false).is_ok());
    assert!(decidir.validate_operation(Operation::Inquire, false).is_ok());

    let error = decidir
        .validate_operation(Operation::Store, false)
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &errors::ConnectorError::FlowNotSupported {
            flow: "store".to_string(),
            connector: "decidir".to_string(),
        }
    );
    assert_eq!(
        decidir.verify_strategy(),
        VerifyStrategy::AuthorizeThenVoid {
            amount: MinorUnit::new(100)
        }
    );
}

const PRE_SCRUB: &str = r#"opening connection to developers.decidir.com:443...
<- "POST /api/v2/payments HTTP/1.1\r\nContent-Type: application/json\r\napikey: 5df6b5764c3f4822aecdc82d56f26b9d\r\nCache-Control: no-cache\r\n\r\n"
<- "{\"payment_method_id\":1,\"site_transaction_id\":\"99b0e2fc\",\"bin\":\"450799\",\"card_data\":{\"card_holder_name\":\"Longbob Longsen\",\"card_number\":\"4507990000004905\",\"card_expiration_month\":\"09\",\"card_expiration_year\":\"30\",\"security_code\":\"123\",\"emv_issuer_data\":\"9F0206000000001000\"},\"token_card_data\":{\"expiration_month\":\"09\",\"token\":\"4012001037141112\",\"eci\":\"05\",\"cryptogram\":\"/wBBBBBCd4HzpGYAmbmgguoBBBB=\"}}"
-> "HTTP/1.1 201 Created\r\n"
-> "{\"id\":7719132,\"status\":\"approved\"}""#;

#[test]
fn transcripts_are_scrubbed() {
    let decidir = Decidir::new();
    assert!(decidir.supports_scrubbing());

    let scrubbed = decidir.scrub(PRE_SCRUB);
    assert!(scrubbed.contains("apikey: [FILTERED]"));
    assert!(scrubbed.contains(r#"\"card_number\":\"[FILTERED]\""#));
    assert!(scrubbed.contains(r#"\"security_code\":\"[FILTERED]\""#));
    assert!(scrubbed.contains(r#"\"emv_issuer_data\":\"[FILTERED]\""#));
    assert!(scrubbed.contains(r#"\"cryptogram\":\"/[FILTERED]"#));
    assert!(scrubbed.contains(r#"\"token\":\"[FILTERED]\""#));
    assert!(!scrubbed.contains("5df6b5764c3f4822aecdc82d56f26b9d"));
    assert!(!scrubbed.contains("4507990000004905"));
    assert!(!scrubbed.contains("4012001037141112"));
    assert!(!scrubbed.contains("9F0206000000001000"));
    assert!(!scrubbed.contains("BBBB="));
    // unrelated digits survive
    assert!(scrubbed.contains(r#"\"bin\":\"450799\""#));
    assert!(scrubbed.contains(r#"\"id\":7719132"#));

    assert_eq!(decidir.scrub(&scrubbed), scrubbed);
}

#[test]
fn chip_data_and_cryptograms_are_scrubbed_whole() {
    let decidir = Decidir::new();
    let transcript = r#"<- "{\"card_data\":{\"emv_issuer_data\":\"9F26AB08C1d2E3f4\"},\"token_card_data\":{\"cryptogram\":\"/AgAAAAAAAIR8CQrXcIhbQ+/Q==\",\"eci\":\"05\"}}""#;

    let scrubbed = decidir.scrub(transcript);
    assert!(scrubbed.contains(r#"\"emv_issuer_data\":\"[FILTERED]\""#));
    assert!(scrubbed.contains(r#"\"cryptogram\":\"/[FILTERED]\""#));
    assert!(!scrubbed.contains("9F26"));
    assert!(!scrubbed.contains("C1d2E3f4"));
    assert!(!scrubbed.contains("Q+/Q=="));
    assert!(scrubbed.contains(r#"\"eci\":\"05\""#));
    assert_eq!(decidir.scrub(&scrubbed), scrubbed);
}
