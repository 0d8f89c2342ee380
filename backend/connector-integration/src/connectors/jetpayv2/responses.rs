use std::collections::HashMap;

use domain_types::router_response_types::ResponseParams;
use once_cell::sync::Lazy;

use crate::utils::get_param_as_string;

pub const APPROVED_ACTION_CODE: &str = "000";

pub const MISSING_ACTION_CODE_MESSAGE: &str = "No response returned (missing credentials?).";

/// The flattened `<JetPayResponse>` fields this connector reads.
#[derive(Debug, Default)]
pub struct JetpayResponse {
    pub transaction_id: Option<String>,
    pub action_code: Option<String>,
    pub approval: Option<String>,
    pub token: Option<String>,
    pub avs: Option<String>,
    pub cvv2: Option<String>,
    pub response_text: Option<String>,
}

impl JetpayResponse {
    /// Each field is read on its own; one that is not text (or a number) is simply absent.
    pub fn from_params(params: &ResponseParams) -> Self {
        Self {
            transaction_id: get_param_as_string(params, "transaction_id"),
            action_code: get_param_as_string(params, "action_code"),
            approval: get_param_as_string(params, "approval"),
            token: get_param_as_string(params, "token"),
            avs: get_param_as_string(params, "avs"),
            cvv2: get_param_as_string(params, "cvv2"),
            response_text: get_param_as_string(params, "response_text"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.action_code.as_deref() == Some(APPROVED_ACTION_CODE)
    }

    pub fn error_message(&self) -> String {
        self.action_code
            .as_deref()
            .and_then(|code| ACTION_CODE_MESSAGES.get(code))
            .copied()
            .unwrap_or(MISSING_ACTION_CODE_MESSAGE)
            .to_string()
    }
}

pub static ACTION_CODE_MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("000", "Approved."),
        ("001", "Refer to card issuer."),
        ("002", "Refer to card issuer, special condition."),
        ("003", "Invalid merchant or service provider."),
        ("004", "Pick up card."),
        ("005", "Do not honor."),
        ("006", "Error."),
        ("007", "Pick up card, special condition."),
        ("008", "Honor with ID (Show ID)."),
        ("010", "Partial approval."),
        ("011", "VIP approval."),
        ("012", "Invalid transaction."),
        ("013", "Invalid amount or exceeds maximum for card program."),
        ("014", "Invalid account number (no such number)."),
        ("015", "No such issuer."),
        ("019", "Re-enter Transaction."),
        ("021", "No action taken (unable to back out prior transaction)."),
        ("025", "Transaction Not Found."),
        ("027", "File update field edit error."),
        ("028", "File is temporarily unavailable."),
        ("030", "Format error."),
        ("039", "No credit account."),
        ("041", "Pick up card (lost card)."),
        ("043", "Pick up card (stolen card)."),
        ("051", "Insufficient funds."),
        ("052", "No checking account."),
        ("053", "No savings account."),
        ("054", "Expired Card."),
        ("055", "Incorrect PIN."),
        ("057", "Transaction not permitted to cardholder."),
        ("058", "Transaction not allowed at terminal."),
        ("061", "Exceeds withdrawal limit."),
        ("062", "Restricted card (eg, Country Exclusion)."),
        ("063", "Security violation."),
        ("065", "Activity count limit exceeded."),
        ("068", "Response late."),
        ("070", "Contact card issuer."),
        ("071", "PIN not changed."),
        ("075", "Allowable number of PIN-entry tries exceeded."),
        ("076", "Unable to locate previous message (no matching retrieval reference number)."),
        ("077", "Repeat or reversal data are inconsistent with original message."),
        ("078", "Blocked (first use), or non-existent account."),
        ("079", "Key exchange validation failed."),
        ("080", "Credit issuer unavailable or invalid date."),
        ("081", "PIN cryptographic error found."),
        ("082", "Negative online CVV results."),
        ("084", "Invalid auth life cycle."),
        ("085", "No reason to decline - CVV or AVS approved."),
        ("086", "Cannot verify PIN."),
        ("087", "Cashback not allowed."),
        ("089", "Issuer Down."),
        ("091", "Issuer Down."),
        ("092", "Unable to route transaction."),
        ("093", "Transaction cannot be completed - violation of law."),
        ("094", "Duplicate transmission."),
        ("096", "System error."),
        ("100", "Deny."),
        ("101", "Expired Card."),
        ("103", "Deny - Invalid manual Entry 4DBC."),
        ("104", "Deny - New card issued."),
        ("105", "Deny - Account Cancelled."),
        ("106", "Exceeded PIN Attempts."),
        ("107", "Please Call Issuer."),
        ("109", "Invalid merchant."),
        ("110", "Invalid amount."),
        ("111", "Invalid account."),
        ("115", "Service not permitted."),
        ("117", "Invalid PIN."),
        ("119", "Card member not enrolled."),
        ("122", "Invalid card (CID) security code."),
        ("125", "Invalid effective date."),
        ("181", "Format error."),
        ("182", "Please wait."),
        ("183", "Invalid currency code."),
        ("187", "Deny - new card issued."),
        ("188", "Deny - Expiration date required."),
        ("189", "Deny - Cancelled or Closed Merchant/SE."),
        ("200", "Deny - Pick up card."),
        ("400", "Reversal accepted."),
        ("601", "Reject - EMV Chip Declined Transaction."),
        ("602", "Reject - Suspected Fraud."),
        ("603", "Reject - Communications Error."),
        ("604", "Reject - Insufficient Approval."),
        ("750", "Velocity Check Fail."),
        ("899", "Misc Decline."),
        ("900", "Invalid Message Type."),
        ("901", "Invalid Merchant ID."),
        ("903", "Debit not supported."),
        ("904", "Private label not supported."),
        ("905", "Invalid card type."),
        ("906", "Unit not active."),
        ("908", "Manual card entry invalid."),
        ("909", "Invalid track information."),
        ("911", "Master merchant not found."),
        ("912", "Invalid card format."),
        ("913", "Invalid card type."),
        ("914", "Invalid card length."),
        ("917", "Expired card."),
        ("919", "Invalid entry type."),
        ("920", "Invalid amount."),
        ("921", "Invalid message format."),
        ("923", "Invalid ABA."),
        ("924", "Invalid DDA."),
        ("925", "Invalid TID."),
        ("926", "Invalid Password."),
        ("930", "Invalid zipcode."),
        ("931", "Invalid Address."),
        ("932", "Invalid ZIP and Address."),
        ("933", "Invalid CVV2."),
        ("934", "Program Not Allowed."),
        ("935", "Invalid Device/App."),
        ("940", "Record Not Found."),
        ("941", "Merchant ID error."),
        ("942", "Refund Not Allowed."),
        ("943", "Refund denied."),
        ("955", "Invalid PIN block."),
        ("956", "Invalid KSN."),
        ("958", "Bad Status."),
        ("959", "Seek Record limit exceeded."),
        ("960", "Internal Key Database Error."),
        ("961", "TRANS not Supported. Cash Disbursement required a specific MCC."),
        ("962", "Invalid PIN key (Unknown KSN)."),
        ("981", "Invalid AVS."),
        ("987", "Issuer Unavailable."),
        ("988", "System error SD."),
        ("989", "Database Error."),
        ("992", "Transaction Timeout."),
        ("996", "Bad Terminal ID."),
        ("997", "Message rejected by association."),
        ("999", "Communication failure"),
    ])
});
