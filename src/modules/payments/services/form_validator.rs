use masking::PeekInterface;

use crate::core::{AppError, Result};
use crate::modules::payments::models::{CreditCardInfo, PaymentForm};

/// Checkout-side validation of the card entry form
///
/// Warnings are customer-facing strings and the full list is returned in
/// one pass. Extraction copies the raw field values; the gateway performs
/// its own card verification.
pub struct PaymentFormValidator;

impl PaymentFormValidator {
    /// Validate the form, returning the complete warning list
    pub fn validate(form: &PaymentForm) -> Vec<String> {
        let mut warnings = Vec::new();

        if form.cardholder_name.trim().is_empty() {
            warnings.push("Enter cardholder name".to_string());
        }

        if !card_number_valid(form.card_number.peek()) {
            warnings.push("Wrong card number".to_string());
        }

        if !card_code_valid(form.card_code.peek()) {
            warnings.push("Wrong card code".to_string());
        }

        match form.expire_month.trim().parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => {}
            _ => warnings.push("Select card expiration month".to_string()),
        }

        if form.expire_year.trim().parse::<u32>().is_err() {
            warnings.push("Select card expiration year".to_string());
        }

        warnings
    }

    /// Extract card data from a validated form
    pub fn payment_info(form: &PaymentForm) -> Result<CreditCardInfo> {
        let expire_month = form
            .expire_month
            .trim()
            .parse::<u32>()
            .map_err(|_| AppError::validation("Card expiration month is not a number"))?;
        let expire_year = form
            .expire_year
            .trim()
            .parse::<u32>()
            .map_err(|_| AppError::validation("Card expiration year is not a number"))?;

        Ok(CreditCardInfo {
            cardholder_name: form.cardholder_name.clone(),
            card_number: form.card_number.clone(),
            expire_month,
            expire_year,
            card_code: form.card_code.clone(),
        })
    }
}

/// Digits only after stripping separators, 12 to 19 digits, Luhn-valid
fn card_number_valid(card_number: &str) -> bool {
    let digits: String = card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    luhn::valid(&digits)
}

fn card_code_valid(card_code: &str) -> bool {
    (card_code.len() == 3 || card_code.len() == 4)
        && card_code.chars().all(|c| c.is_ascii_digit())
}
