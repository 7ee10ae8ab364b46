use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::payment_form::{CreditCardInfo, PaymentForm};

/// Customer address as supplied by the order pipeline
///
/// `country_code` carries the three-letter ISO code and `state_abbreviation`
/// the short province code, matching what the gateway expects in its
/// address blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state_abbreviation: String,
    pub country_code: String,
    pub zip_postal_code: String,
    pub phone_number: String,
}

/// Transaction references stored on an order by earlier payment steps
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderPaymentInfo {
    pub authorization_transaction_id: Option<String>,
    pub capture_transaction_id: Option<String>,
}

/// Payment request as posted to the processing endpoint
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentApiRequest {
    #[serde(default)]
    pub store_id: i64,

    /// Order identifier forwarded to the gateway as the invoice number
    pub order_guid: Uuid,

    pub order_total: Decimal,

    #[serde(default)]
    pub customer_ip: Option<String>,

    pub billing_address: Address,

    #[serde(default)]
    pub shipping_address: Option<Address>,

    /// Card entry fields, validated before processing
    pub form: PaymentForm,
}

/// Fully assembled payment request handed to a payment method
#[derive(Debug, Clone)]
pub struct ProcessPaymentRequest {
    pub store_id: i64,
    pub order_guid: Uuid,
    pub order_total: Decimal,
    pub customer_ip: Option<String>,
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
    pub credit_card: CreditCardInfo,
}

impl ProcessPaymentRequest {
    pub fn from_api(request: ProcessPaymentApiRequest, credit_card: CreditCardInfo) -> Self {
        Self {
            store_id: request.store_id,
            order_guid: request.order_guid,
            order_total: request.order_total,
            customer_ip: request.customer_ip,
            billing_address: request.billing_address,
            shipping_address: request.shipping_address,
            credit_card,
        }
    }
}

/// Capture request for a previously authorized order
#[derive(Debug, Clone, Deserialize)]
pub struct CapturePaymentRequest {
    #[serde(default)]
    pub store_id: i64,
    pub order: OrderPaymentInfo,
}

/// Refund request against a captured order
#[derive(Debug, Clone, Deserialize)]
pub struct RefundPaymentRequest {
    #[serde(default)]
    pub store_id: i64,
    pub order: OrderPaymentInfo,
    pub amount_to_refund: Decimal,
    #[serde(default)]
    pub is_partial_refund: bool,
}

/// Void request for a pending authorization
#[derive(Debug, Clone, Deserialize)]
pub struct VoidPaymentRequest {
    #[serde(default)]
    pub store_id: i64,
    pub order: OrderPaymentInfo,
}

/// Cancellation request for a recurring payment agreement
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CancelRecurringPaymentRequest {
    pub store_id: i64,
    pub order: OrderPaymentInfo,
}
