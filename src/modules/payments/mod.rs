pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{PaymentStatus, ProcessPaymentResult};
pub use services::{CardknoxPaymentProcessor, PaymentMethod, PaymentMethodRegistry};
