use masking::Secret;
use serde::{Deserialize, Serialize};

/// API version sent as `xVersion` when the merchant settings do not override it
pub const DEFAULT_API_VERSION: &str = "4.5.9";

/// Merchant credentials and software identification sent with every command
#[derive(Debug, Clone)]
pub struct Credentials {
    pub transaction_key: Secret<String>,
    pub software_name: String,
    pub software_version: String,
    pub api_version: Option<String>,
}

impl Credentials {
    pub fn new(
        transaction_key: Secret<String>,
        software_name: String,
        software_version: String,
    ) -> Self {
        Self {
            transaction_key,
            software_name,
            software_version,
            api_version: None,
        }
    }

    pub fn with_api_version(
        transaction_key: Secret<String>,
        software_name: String,
        software_version: String,
        api_version: String,
    ) -> Self {
        Self {
            transaction_key,
            software_name,
            software_version,
            api_version: Some(api_version),
        }
    }
}

/// Billing address block in the gateway's flat field convention
#[derive(Debug, Clone, Default, Serialize)]
pub struct BillingAddress {
    #[serde(rename = "xBillFirstName")]
    pub first_name: String,
    #[serde(rename = "xBillLastName")]
    pub last_name: String,
    #[serde(rename = "xBillCompany")]
    pub company: String,
    #[serde(rename = "xBillStreet")]
    pub street: String,
    #[serde(rename = "xBillStreet2")]
    pub street2: String,
    #[serde(rename = "xBillCity")]
    pub city: String,
    #[serde(rename = "xBillState")]
    pub state: String,
    #[serde(rename = "xBillZip")]
    pub zip: String,
    #[serde(rename = "xBillCountry")]
    pub country: String,
    #[serde(rename = "xBillPhone")]
    pub phone: String,
}

/// Shipping address block in the gateway's flat field convention
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShippingAddress {
    #[serde(rename = "xShipFirstName")]
    pub first_name: String,
    #[serde(rename = "xShipLastName")]
    pub last_name: String,
    #[serde(rename = "xShipCompany")]
    pub company: String,
    #[serde(rename = "xShipStreet")]
    pub street: String,
    #[serde(rename = "xShipStreet2")]
    pub street2: String,
    #[serde(rename = "xShipCity")]
    pub city: String,
    #[serde(rename = "xShipState")]
    pub state: String,
    #[serde(rename = "xShipZip")]
    pub zip: String,
    #[serde(rename = "xShipCountry")]
    pub country: String,
    #[serde(rename = "xShipPhone")]
    pub phone: String,
}

/// Card payment request for `cc:authonly` and `cc:sale`
///
/// `street`/`zip` are the AVS fields and always carry the billing address;
/// the full address blocks are optional and can be withheld by merchant
/// settings.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    #[serde(rename = "xName")]
    pub cardholder_name: String,
    #[serde(rename = "xCardNum")]
    pub card_number: Secret<String>,
    #[serde(rename = "xExp")]
    pub card_expiry: Secret<String>,
    #[serde(rename = "xCVV")]
    pub card_code: Secret<String>,
    #[serde(rename = "xAmount")]
    pub amount: String,
    #[serde(rename = "xInvoice")]
    pub invoice: String,
    #[serde(rename = "xEmail")]
    pub email: String,
    #[serde(rename = "xIP", skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
    #[serde(rename = "xStreet")]
    pub street: String,
    #[serde(rename = "xZip")]
    pub zip: String,
    #[serde(rename = "xCustReceipt")]
    pub customer_receipt: bool,
    #[serde(flatten)]
    pub billing_address: Option<BillingAddress>,
    #[serde(flatten)]
    pub shipping_address: Option<ShippingAddress>,
}

/// Reference-keyed request for `cc:capture`
#[derive(Debug, Clone, Serialize)]
pub struct CaptureRequest {
    #[serde(rename = "xRefNum")]
    pub reference_number: String,
}

/// Reference-keyed request for `cc:refund`
#[derive(Debug, Clone, Serialize)]
pub struct RefundRequest {
    #[serde(rename = "xRefNum")]
    pub reference_number: String,
    #[serde(rename = "xAmount")]
    pub amount: String,
}

/// Reference-keyed request for `cc:void`
#[derive(Debug, Clone, Serialize)]
pub struct VoidRequest {
    #[serde(rename = "xRefNum")]
    pub reference_number: String,
}

/// Raw response fields of the JSON transaction endpoint (subset used)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponse {
    #[serde(rename = "xResult", default)]
    pub result: Option<String>,
    #[serde(rename = "xStatus", default)]
    pub status: Option<String>,
    #[serde(rename = "xError", default)]
    pub error: Option<String>,
    #[serde(rename = "xErrorCode", default)]
    pub error_code: Option<String>,
    #[serde(rename = "xRefNum", default)]
    pub reference_number: Option<String>,
    #[serde(rename = "xAuthCode", default)]
    pub auth_code: Option<String>,
    #[serde(rename = "xAuthAmount", default)]
    pub auth_amount: Option<String>,
    #[serde(rename = "xMaskedCardNumber", default)]
    pub masked_card_number: Option<String>,
}

/// Gateway outcome classification
///
/// Every dispatched operation resolves to exactly one of these. Transport
/// failures are classified (`Timeout`, `HttpException`) instead of being
/// propagated as errors, so callers always see a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Accepted,
    Declined,
    Error,
    Timeout,
    HttpException,
}

/// Classified outcome of a dispatched gateway operation
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub response_type: ResponseType,
    pub reference_number: Option<String>,
    pub auth_code: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl GatewayResponse {
    /// Classify a decoded gateway body
    ///
    /// `xStatus` (Approved/Declined/Error) is authoritative; `xResult`
    /// (A/D/E) is the fallback for older response shapes.
    pub fn from_wire(wire: WireResponse) -> Self {
        let response_type = match wire.status.as_deref() {
            Some("Approved") => ResponseType::Accepted,
            Some("Declined") => ResponseType::Declined,
            Some(_) => ResponseType::Error,
            None => match wire.result.as_deref() {
                Some("A") => ResponseType::Accepted,
                Some("D") => ResponseType::Declined,
                _ => ResponseType::Error,
            },
        };

        Self {
            response_type,
            reference_number: wire.reference_number,
            auth_code: wire.auth_code,
            error_code: wire.error_code,
            error_message: wire.error,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Timeout,
            reference_number: None,
            auth_code: None,
            error_code: Some("timeout".to_string()),
            error_message: Some(message.into()),
        }
    }

    pub fn http_exception(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::HttpException,
            reference_number: None,
            auth_code: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.response_type == ResponseType::Accepted
    }

    /// Error code/message pair as surfaced in order-level error strings
    pub fn error_pair(&self) -> String {
        format!(
            "Error code: {} - Error Message: {}",
            self.error_code.as_deref().unwrap_or_default(),
            self.error_message.as_deref().unwrap_or_default()
        )
    }
}
