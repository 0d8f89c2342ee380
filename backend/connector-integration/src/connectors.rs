pub mod macros;

pub mod decidir;
pub use self::decidir::Decidir;

pub mod jetpayv2;
pub use self::jetpayv2::Jetpayv2;
