pub mod client;
pub mod types;

pub use client::CardknoxClient;
pub use types::{
    BillingAddress, CaptureRequest, Credentials, GatewayResponse, PaymentRequest, RefundRequest,
    ResponseType, ShippingAddress, VoidRequest,
};
