pub mod form_validator;
pub mod method_registry;
pub mod payment_method;
pub mod processor;

pub use form_validator::PaymentFormValidator;
pub use method_registry::{MethodDescriptor, PaymentMethodRegistry};
pub use payment_method::{PaymentMethod, PaymentMethodType, RecurringPaymentType};
pub use processor::CardknoxPaymentProcessor;
