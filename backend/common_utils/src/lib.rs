//! Common utilities for the payment gateway crates

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod pii;
pub mod request;
pub mod types;

pub use errors::{CustomResult, ParsingError, ValidationError};
pub use pii::Email;
pub use request::{Method, Request, RequestContent};
pub use types::{
    AmountConvertor, MinorUnit, MinorUnitForConnector, StringMinorUnit,
    StringMinorUnitForConnector,
};

/// Generate a nanoid with the given prefix and length
#[inline]
pub fn generate_id(length: usize, prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid::nanoid!(length, &consts::ALPHABETS))
}

/// Generate a prefix-less nanoid of the given length
#[inline]
pub fn generate_id_without_prefix(length: usize) -> String {
    nanoid::nanoid!(length, &consts::ALPHABETS)
}
