//! Tag-tree response parsing.

use domain_types::router_response_types::ResponseParams;
use once_cell::sync::Lazy;
use quick_xml::{events::Event, Reader};
use regex::Regex;
use serde_json::Value;

static ACRONYM_BOUNDARY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").ok());
static WORD_BOUNDARY: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").ok());

/// `TransactionID` becomes `transaction_id`, `UDField1` becomes `ud_field1`.
pub fn underscore(name: &str) -> String {
    let mut word = name.to_string();
    if let Some(regex) = ACRONYM_BOUNDARY.as_ref() {
        word = regex.replace_all(&word, "${1}_${2}").into_owned();
    }
    if let Some(regex) = WORD_BOUNDARY.as_ref() {
        word = regex.replace_all(&word, "${1}_${2}").into_owned();
    }
    word.replace('-', "_").to_lowercase()
}

struct OpenTag {
    name: String,
    has_children: bool,
    text: String,
}

/// Flattens every leaf below the root element into one mapping keyed by the underscored tag
/// name. Later duplicates overwrite earlier ones and empty leaves map to `null`.
pub fn flatten_tag_tree(xml: &str) -> Result<ResponseParams, quick_xml::Error> {
    let mut params = ResponseParams::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<OpenTag> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
                stack.push(OpenTag {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    has_children: false,
                    text: String::new(),
                });
            }
            Event::Text(e) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(closed) = stack.pop() {
                    // the root element itself is never a field
                    if !stack.is_empty() && !closed.has_children {
                        let value = if closed.text.is_empty() {
                            Value::Null
                        } else {
                            Value::String(closed.text)
                        };
                        params.insert(underscore(&closed.name), value);
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                    params.insert(
                        underscore(&String::from_utf8_lossy(e.name().as_ref())),
                        Value::Null,
                    );
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(quick_xml::Error::UnexpectedEof(open.name.clone()));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn underscores_pascal_case_and_acronyms() {
        assert_eq!(underscore("TransactionID"), "transaction_id");
        assert_eq!(underscore("ActionCode"), "action_code");
        assert_eq!(underscore("UDField1"), "ud_field1");
        assert_eq!(underscore("CVV2"), "cvv2");
        assert_eq!(underscore("AVS"), "avs");
        assert_eq!(underscore("ResponseText"), "response_text");
    }

    #[test]
    fn nested_leaves_are_flattened_without_the_root() {
        let params = flatten_tag_tree(
            "<JetPayResponse><TransactionID>8afa688fd002821362</TransactionID>\
             <ActionCode>000</ActionCode><Approval>502F6B</Approval>\
             <Token/><Billing><Address>1234 My Street</Address></Billing>\
             <ResponseText></ResponseText></JetPayResponse>",
        )
        .unwrap();

        assert_eq!(params["transaction_id"], "8afa688fd002821362");
        assert_eq!(params["action_code"], "000");
        assert_eq!(params["approval"], "502F6B");
        assert_eq!(params["address"], "1234 My Street");
        assert_eq!(params["token"], Value::Null);
        assert_eq!(params["response_text"], Value::Null);
        assert!(!params.contains_key("jet_pay_response"));
        assert!(!params.contains_key("billing"));
    }

    #[test]
    fn later_duplicates_win() {
        let params = flatten_tag_tree(
            "<R><Billing><Phone>111</Phone></Billing><Shipping><Phone>222</Phone></Shipping></R>",
        )
        .unwrap();
        assert_eq!(params["phone"], "222");
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(flatten_tag_tree("<R><ActionCode>000</Wrong></R>").is_err());
        assert!(flatten_tag_tree("<R><ActionCode>000</ActionCode>").is_err());
    }

    #[test]
    fn empty_input_is_an_empty_mapping() {
        assert!(flatten_tag_tree("").unwrap().is_empty());
    }
}
