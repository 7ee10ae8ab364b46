use serde::{Deserialize, Serialize};

/// Order payment status produced by gateway outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No status change requested
    #[default]
    Pending,
    /// Funds reserved, capture still pending
    Authorized,
    /// Funds captured
    Paid,
    /// Part of the captured amount returned
    PartiallyRefunded,
    /// Full captured amount returned
    Refunded,
    /// Authorization released without capture
    Voided,
}

/// Outcome of an authorize or sale attempt
///
/// A result with no errors is a success; the transaction reference fields
/// are only filled for accepted payments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessPaymentResult {
    pub new_payment_status: PaymentStatus,
    pub authorization_transaction_id: Option<String>,
    pub authorization_transaction_code: Option<String>,
    pub authorization_transaction_result: Option<String>,
    pub capture_transaction_id: Option<String>,
    pub capture_transaction_result: Option<String>,
    pub errors: Vec<String>,
}

impl ProcessPaymentResult {
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a capture attempt
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapturePaymentResult {
    pub new_payment_status: PaymentStatus,
    pub capture_transaction_id: Option<String>,
    pub capture_transaction_result: Option<String>,
    pub errors: Vec<String>,
}

impl CapturePaymentResult {
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a refund attempt
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefundPaymentResult {
    pub new_payment_status: PaymentStatus,
    pub errors: Vec<String>,
}

impl RefundPaymentResult {
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a void attempt
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoidPaymentResult {
    pub new_payment_status: PaymentStatus,
    pub errors: Vec<String>,
}

impl VoidPaymentResult {
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a recurring payment cancellation
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelRecurringPaymentResult {
    pub errors: Vec<String>,
}

impl CancelRecurringPaymentResult {
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}
