//! Caller-facing entry point: loads configuration, installs logging and runs gateway
//! operations against the selected connector.

pub mod configs;
pub mod error;
pub mod logger;
pub mod payments;

pub use payments::{GatewayConfig, PaymentGateway};
