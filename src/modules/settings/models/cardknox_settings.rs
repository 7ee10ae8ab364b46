use crate::core::AppError;
use masking::{PeekInterface, Secret};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authorization flow selected by merchant configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactMode {
    /// Reserve funds at checkout; capture later from order management
    #[default]
    Authorize,
    /// Authorize and capture in one step
    AuthorizeAndCapture,
}

impl fmt::Display for TransactMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactMode::Authorize => write!(f, "authorize"),
            TransactMode::AuthorizeAndCapture => write!(f, "authorize_and_capture"),
        }
    }
}

impl FromStr for TransactMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorize" => Ok(TransactMode::Authorize),
            "authorize_and_capture" => Ok(TransactMode::AuthorizeAndCapture),
            other => Err(AppError::validation(format!(
                "Unknown transact mode: {}",
                other
            ))),
        }
    }
}

/// Names under which the method's configuration is persisted in the
/// settings store
pub mod keys {
    pub const TRANSACT_MODE: &str = "payments.cardknox.transact_mode";
    pub const TRANSACTION_KEY: &str = "payments.cardknox.transaction_key";
    pub const SOFTWARE_NAME: &str = "payments.cardknox.software_name";
    pub const SOFTWARE_VERSION: &str = "payments.cardknox.software_version";
    pub const OVERRIDE_API_VERSION: &str = "payments.cardknox.override_api_version";
    pub const API_VERSION: &str = "payments.cardknox.api_version";
    pub const USE_SHIPPING_ADDRESS_AS_BILLING: &str =
        "payments.cardknox.use_shipping_address_as_billing";
    pub const HIDE_ADDRESS_DETAILS: &str = "payments.cardknox.hide_address_details";
    pub const SEND_RECEIPT_TO_CUSTOMER: &str = "payments.cardknox.send_receipt_to_customer";
    pub const ADDITIONAL_FEE: &str = "payments.cardknox.additional_fee";
    pub const ADDITIONAL_FEE_PERCENTAGE: &str = "payments.cardknox.additional_fee_percentage";

    /// Prefix owning every setting of this payment method
    pub const PREFIX: &str = "payments.cardknox.";
}

/// Merchant configuration of the Cardknox payment method, loaded per store
/// scope from the settings store
#[derive(Debug, Clone)]
pub struct CardknoxSettings {
    pub transact_mode: TransactMode,
    pub transaction_key: Secret<String>,
    pub software_name: String,
    pub software_version: String,
    pub override_api_version: bool,
    pub api_version: String,
    pub use_shipping_address_as_billing: bool,
    pub hide_address_details: bool,
    pub send_receipt_to_customer: bool,
    pub additional_fee: Decimal,
    pub additional_fee_percentage: bool,
}

impl Default for CardknoxSettings {
    fn default() -> Self {
        Self {
            transact_mode: TransactMode::Authorize,
            transaction_key: Secret::new(String::new()),
            software_name: "payknox".to_string(),
            software_version: "Default".to_string(),
            override_api_version: false,
            api_version: String::new(),
            use_shipping_address_as_billing: false,
            hide_address_details: false,
            send_receipt_to_customer: false,
            additional_fee: Decimal::ZERO,
            additional_fee_percentage: false,
        }
    }
}

/// Admin configuration DTO
///
/// Each `*_override_for_store` flag marks whether the field is written at
/// the active store scope or inherited from the all-stores scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationModel {
    #[serde(default)]
    pub active_store_scope: i64,

    pub transact_mode: TransactMode,
    #[serde(default)]
    pub transact_mode_override_for_store: bool,

    pub transaction_key: String,
    #[serde(default)]
    pub transaction_key_override_for_store: bool,

    pub software_name: String,
    #[serde(default)]
    pub software_name_override_for_store: bool,

    pub software_version: String,
    #[serde(default)]
    pub software_version_override_for_store: bool,

    pub override_api_version: bool,
    #[serde(default)]
    pub override_api_version_override_for_store: bool,

    pub api_version: String,
    #[serde(default)]
    pub api_version_override_for_store: bool,

    pub use_shipping_address_as_billing: bool,
    #[serde(default)]
    pub use_shipping_address_as_billing_override_for_store: bool,

    pub hide_address_details: bool,
    #[serde(default)]
    pub hide_address_details_override_for_store: bool,

    pub send_receipt_to_customer: bool,
    #[serde(default)]
    pub send_receipt_to_customer_override_for_store: bool,

    pub additional_fee: Decimal,
    #[serde(default)]
    pub additional_fee_override_for_store: bool,

    pub additional_fee_percentage: bool,
    #[serde(default)]
    pub additional_fee_percentage_override_for_store: bool,
}

impl ConfigurationModel {
    /// Build the admin view of the given settings; override flags start
    /// cleared and are filled from the store-scoped rows by the controller
    pub fn from_settings(settings: &CardknoxSettings, active_store_scope: i64) -> Self {
        Self {
            active_store_scope,
            transact_mode: settings.transact_mode,
            transact_mode_override_for_store: false,
            transaction_key: settings.transaction_key.peek().clone(),
            transaction_key_override_for_store: false,
            software_name: settings.software_name.clone(),
            software_name_override_for_store: false,
            software_version: settings.software_version.clone(),
            software_version_override_for_store: false,
            override_api_version: settings.override_api_version,
            override_api_version_override_for_store: false,
            api_version: settings.api_version.clone(),
            api_version_override_for_store: false,
            use_shipping_address_as_billing: settings.use_shipping_address_as_billing,
            use_shipping_address_as_billing_override_for_store: false,
            hide_address_details: settings.hide_address_details,
            hide_address_details_override_for_store: false,
            send_receipt_to_customer: settings.send_receipt_to_customer,
            send_receipt_to_customer_override_for_store: false,
            additional_fee: settings.additional_fee,
            additional_fee_override_for_store: false,
            additional_fee_percentage: settings.additional_fee_percentage,
            additional_fee_percentage_override_for_store: false,
        }
    }
}
