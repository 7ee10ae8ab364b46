pub mod payment_form;
pub mod requests;
pub mod results;

pub use payment_form::{CreditCardInfo, PaymentForm};
pub use requests::{
    Address, CancelRecurringPaymentRequest, CapturePaymentRequest, OrderPaymentInfo,
    ProcessPaymentApiRequest, ProcessPaymentRequest, RefundPaymentRequest, VoidPaymentRequest,
};
pub use results::{
    CancelRecurringPaymentResult, CapturePaymentResult, PaymentStatus, ProcessPaymentResult,
    RefundPaymentResult, VoidPaymentResult,
};
