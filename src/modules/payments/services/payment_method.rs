use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::payments::models::{
    CancelRecurringPaymentRequest, CancelRecurringPaymentResult, CapturePaymentRequest,
    CapturePaymentResult, CreditCardInfo, OrderPaymentInfo, PaymentForm, ProcessPaymentRequest,
    ProcessPaymentResult, RefundPaymentRequest, RefundPaymentResult, VoidPaymentRequest,
    VoidPaymentResult,
};

/// Payment method contract of the checkout pipeline
///
/// Covers payment processing, the post-sale operations keyed by stored
/// transaction references, form validation, fee calculation, capability
/// reporting and the install/uninstall lifecycle.
#[async_trait]
pub trait PaymentMethod: Send + Sync {
    /// Authorize or capture a payment at checkout
    async fn process_payment(
        &self,
        request: ProcessPaymentRequest,
    ) -> Result<ProcessPaymentResult>;

    /// Capture a previously authorized payment
    async fn capture(&self, request: CapturePaymentRequest) -> Result<CapturePaymentResult>;

    /// Refund a captured payment, fully or partially
    async fn refund(&self, request: RefundPaymentRequest) -> Result<RefundPaymentResult>;

    /// Release a pending authorization
    async fn void(&self, request: VoidPaymentRequest) -> Result<VoidPaymentResult>;

    /// Charge an installment of a recurring agreement
    async fn process_recurring_payment(
        &self,
        request: ProcessPaymentRequest,
    ) -> Result<ProcessPaymentResult>;

    /// Cancel a recurring agreement
    async fn cancel_recurring_payment(
        &self,
        request: CancelRecurringPaymentRequest,
    ) -> Result<CancelRecurringPaymentResult>;

    /// Hook invoked after the order is placed; standard methods do nothing
    async fn post_process_payment(&self, order: &OrderPaymentInfo) -> Result<()>;

    /// Whether a pending order can re-run payment from order history
    fn can_repost_process_payment(&self, order: &OrderPaymentInfo) -> bool;

    /// Validate the submitted payment form, returning customer warnings
    fn validate_payment_form(&self, form: &PaymentForm) -> Vec<String>;

    /// Extract card data from a validated payment form
    fn get_payment_info(&self, form: &PaymentForm) -> Result<CreditCardInfo>;

    /// Additional fee charged on top of the cart total
    async fn additional_handling_fee(&self, store_id: i64, cart_total: Decimal)
        -> Result<Decimal>;

    /// Whether the method is withheld from the checkout method list
    fn hide_payment_method(&self) -> bool;

    /// Relative URL of the admin configuration page
    fn configuration_page_url(&self) -> String;

    /// Storefront description of the method
    async fn payment_method_description(&self) -> Result<String>;

    fn supports_capture(&self) -> bool;

    fn supports_refund(&self) -> bool;

    fn supports_partial_refund(&self) -> bool;

    fn supports_void(&self) -> bool;

    fn recurring_payment_type(&self) -> RecurringPaymentType;

    fn payment_method_type(&self) -> PaymentMethodType;

    /// Whether checkout may skip the payment info page entirely
    fn skip_payment_info(&self) -> bool;

    /// Seed default settings and locale resources
    async fn install(&self) -> Result<()>;

    /// Remove settings and locale resources
    async fn uninstall(&self) -> Result<()>;

    /// Method system name used for registry lookup
    fn name(&self) -> &str;
}

/// Recurring payment support level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringPaymentType {
    NotSupported,
    Manual,
    Automatic,
}

/// How the method participates in checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Unknown,
    /// Card data collected on the store's own payment page
    Standard,
    /// Customer redirected to a third-party page
    Redirection,
    /// Rendered as a button on the cart page
    Button,
}
