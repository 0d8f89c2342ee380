#[derive(Debug, Clone)]
pub struct Purchase;

#[derive(Debug, Clone)]
pub struct Authorize;

#[derive(Debug, Clone)]
pub struct Capture;

#[derive(Debug, Clone)]
pub struct Refund;

#[derive(Debug, Clone)]
pub struct Void;

#[derive(Debug, Clone)]
pub struct Store;

#[derive(Debug, Clone)]
pub struct Inquire;

#[derive(Debug, Clone)]
pub struct Credit;

/// Caller-visible operations. `Verify` has no flow marker of its own; it is composed from other flows.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Purchase,
    Authorize,
    Capture,
    Refund,
    Void,
    Verify,
    Store,
    Inquire,
    Credit,
}

pub trait FlowOperation {
    const OPERATION: Operation;
}

macro_rules! impl_flow_operation {
    ($($flow:ident),* $(,)?) => {
        $(
            impl FlowOperation for $flow {
                const OPERATION: Operation = Operation::$flow;
            }
        )*
    };
}

impl_flow_operation!(Purchase, Authorize, Capture, Refund, Void, Store, Inquire, Credit);
