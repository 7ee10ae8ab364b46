use masking::Secret;
use serde::Deserialize;

/// Raw card fields as posted from the payment info form
///
/// Month and year arrive as strings and are only parsed after validation;
/// card number and security code stay wrapped so they never reach logs.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentForm {
    pub cardholder_name: String,
    pub card_number: Secret<String>,
    pub expire_month: String,
    pub expire_year: String,
    pub card_code: Secret<String>,
}

/// Card data extracted from a validated payment form
#[derive(Debug, Clone)]
pub struct CreditCardInfo {
    pub cardholder_name: String,
    pub card_number: Secret<String>,
    pub expire_month: u32,
    pub expire_year: u32,
    pub card_code: Secret<String>,
}
