//!
//! Logging for the gateway: console output in pretty or JSON form, filtered per crate.
//!

pub mod config;
pub mod setup;

pub use setup::setup;
