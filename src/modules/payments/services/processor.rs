use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use masking::Secret;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::CardknoxConfig;
use crate::core::{AppError, Result};
use crate::modules::cardknox::{
    BillingAddress, CaptureRequest, CardknoxClient, Credentials, GatewayResponse, PaymentRequest,
    RefundRequest, ResponseType, ShippingAddress, VoidRequest,
};
use crate::modules::locales::services::LocaleService;
use crate::modules::payments::models::{
    Address, CancelRecurringPaymentRequest, CancelRecurringPaymentResult, CapturePaymentRequest,
    CapturePaymentResult, CreditCardInfo, OrderPaymentInfo, PaymentForm, PaymentStatus,
    ProcessPaymentRequest, ProcessPaymentResult, RefundPaymentRequest, RefundPaymentResult,
    VoidPaymentRequest, VoidPaymentResult,
};
use crate::modules::settings::models::{keys, CardknoxSettings, TransactMode};
use crate::modules::settings::services::SettingService;

use super::form_validator::PaymentFormValidator;
use super::payment_method::{PaymentMethod, PaymentMethodType, RecurringPaymentType};

/// System name the method registers under
pub const SYSTEM_NAME: &str = "cardknox";

/// Locale resources seeded at install, keyed by the admin form field names
const LOCALE_RESOURCES: &[(&str, &str)] = &[
    (
        "payments.cardknox.fields.use_shipping_address_as_billing",
        "Use shipping address.",
    ),
    (
        "payments.cardknox.fields.use_shipping_address_as_billing.hint",
        "Check if you want to use the shipping address as a billing address.",
    ),
    ("payments.cardknox.fields.transact_mode", "Transaction mode"),
    (
        "payments.cardknox.fields.transact_mode.hint",
        "Choose transaction mode.",
    ),
    ("payments.cardknox.fields.transaction_key", "Transaction key"),
    (
        "payments.cardknox.fields.transaction_key.hint",
        "Specify transaction key.",
    ),
    ("payments.cardknox.fields.additional_fee", "Additional fee"),
    (
        "payments.cardknox.fields.additional_fee.hint",
        "Enter additional fee to charge your customers.",
    ),
    (
        "payments.cardknox.fields.additional_fee_percentage",
        "Additional fee. Use percentage",
    ),
    (
        "payments.cardknox.fields.additional_fee_percentage.hint",
        "Determines whether to apply a percentage additional fee to the order total. If not enabled, a fixed value is used.",
    ),
    (
        "payments.cardknox.fields.software_name",
        "Software name sent to the Cardknox gateway (required)",
    ),
    (
        "payments.cardknox.fields.software_name.hint",
        "This is a required field to declare to the gateway",
    ),
    (
        "payments.cardknox.fields.software_version",
        "Software version sent to the Cardknox gateway (required)",
    ),
    (
        "payments.cardknox.fields.software_version.hint",
        "This is a required field to declare to the gateway",
    ),
    (
        "payments.cardknox.fields.api_version",
        "Custom API version to be used",
    ),
    (
        "payments.cardknox.fields.api_version.hint",
        "Leave this option empty to use the default API version",
    ),
    (
        "payments.cardknox.fields.override_api_version",
        "Use a custom API version",
    ),
    (
        "payments.cardknox.fields.override_api_version.hint",
        "Leave this option unchecked to use the default API version",
    ),
    ("payments.cardknox.description", "Pay by credit card"),
];

/// Card payment method backed by the Cardknox gateway
///
/// Settings are loaded per store scope on every operation, so admin changes
/// apply to the next payment without a restart.
pub struct CardknoxPaymentProcessor {
    settings: Arc<SettingService>,
    locales: Arc<LocaleService>,
    gateway: CardknoxConfig,
}

impl CardknoxPaymentProcessor {
    pub fn new(
        settings: Arc<SettingService>,
        locales: Arc<LocaleService>,
        gateway: CardknoxConfig,
    ) -> Self {
        Self {
            settings,
            locales,
            gateway,
        }
    }

    /// Build a gateway client from the store's merchant settings
    async fn prepare_client(&self, store_id: i64) -> Result<(CardknoxClient, CardknoxSettings)> {
        let settings = self.settings.load_cardknox_settings(store_id).await?;

        let credentials =
            if settings.override_api_version && !settings.api_version.trim().is_empty() {
                Credentials::with_api_version(
                    settings.transaction_key.clone(),
                    settings.software_name.clone(),
                    settings.software_version.clone(),
                    settings.api_version.clone(),
                )
            } else {
                Credentials::new(
                    settings.transaction_key.clone(),
                    settings.software_name.clone(),
                    settings.software_version.clone(),
                )
            };

        let client = CardknoxClient::new(
            credentials,
            self.gateway.base_url.clone(),
            Duration::from_secs(self.gateway.timeout_secs),
        )?;

        Ok((client, settings))
    }
}

/// Expiry year as sent to the gateway: 4-digit years keep only the last
/// two digits, short years pass through unchanged
pub fn two_digit_expiry_year(year: u32) -> u32 {
    if year > 99 {
        year % 100
    } else {
        year
    }
}

/// Zero-padded `MMYY` expiry composition
pub fn card_expiry(month: u32, year: u32) -> String {
    format!("{:02}{:02}", month, two_digit_expiry_year(year))
}

/// Fixed or percentage fee applied on top of the cart total
pub fn calculate_additional_fee(cart_total: Decimal, fee: Decimal, use_percentage: bool) -> Decimal {
    if fee <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    if use_percentage {
        cart_total * fee / Decimal::ONE_HUNDRED
    } else {
        fee
    }
}

/// Map a gateway outcome onto the checkout payment result
pub fn map_process_response(
    mode: TransactMode,
    response: &GatewayResponse,
) -> ProcessPaymentResult {
    let mut result = ProcessPaymentResult::default();

    match response.response_type {
        ResponseType::Accepted => {
            match mode {
                TransactMode::Authorize => {
                    result.authorization_transaction_id = response.reference_number.clone();
                    result.authorization_transaction_code = response.reference_number.clone();
                    result.new_payment_status = PaymentStatus::Authorized;
                }
                TransactMode::AuthorizeAndCapture => {
                    result.capture_transaction_id = response.reference_number.clone();
                    result.new_payment_status = PaymentStatus::Paid;
                }
            }
            result.authorization_transaction_result = Some("Payment request approved".to_string());
        }
        ResponseType::Declined => {
            result.add_error(format!("Payment declined. {}", response.error_pair()));
        }
        ResponseType::Error => {
            result.add_error(format!("Payment error. {}", response.error_pair()));
        }
        ResponseType::Timeout => {
            result.add_error(format!(
                "Payment timeout. Please try again. {}",
                response.error_pair()
            ));
        }
        ResponseType::HttpException => {
            result.add_error(format!(
                "Communication error. Please try again. {}",
                response.error_pair()
            ));
        }
    }

    result
}

/// Map a gateway outcome onto the capture result
pub fn map_capture_response(response: &GatewayResponse) -> CapturePaymentResult {
    let mut result = CapturePaymentResult::default();

    match response.response_type {
        ResponseType::Accepted => {
            result.capture_transaction_id = response.reference_number.clone();
            result.new_payment_status = PaymentStatus::Paid;
            result.capture_transaction_result = Some("Payment capture successful".to_string());
        }
        ResponseType::Declined => {
            result.add_error(format!("Payment capture declined. {}", response.error_pair()));
        }
        ResponseType::Error => {
            result.add_error(format!("Payment capture error. {}", response.error_pair()));
        }
        ResponseType::Timeout => {
            result.add_error(format!(
                "Payment capture timeout. Please try again. {}",
                response.error_pair()
            ));
        }
        ResponseType::HttpException => {
            result.add_error(format!(
                "Communication error. Please try again. {}",
                response.error_pair()
            ));
        }
    }

    result
}

/// Map a gateway outcome onto the refund result
pub fn map_refund_response(is_partial: bool, response: &GatewayResponse) -> RefundPaymentResult {
    let mut result = RefundPaymentResult::default();

    match response.response_type {
        ResponseType::Accepted => {
            result.new_payment_status = if is_partial {
                PaymentStatus::PartiallyRefunded
            } else {
                PaymentStatus::Refunded
            };
        }
        ResponseType::Declined => {
            result.add_error(format!("Payment refund declined. {}", response.error_pair()));
        }
        ResponseType::Error => {
            result.add_error(format!("Payment refund error. {}", response.error_pair()));
        }
        ResponseType::Timeout => {
            result.add_error(format!(
                "Payment refund timeout. Please try again. {}",
                response.error_pair()
            ));
        }
        ResponseType::HttpException => {
            result.add_error(format!(
                "Communication error. Please try again. {}",
                response.error_pair()
            ));
        }
    }

    result
}

/// Map a gateway outcome onto the void result
pub fn map_void_response(response: &GatewayResponse) -> VoidPaymentResult {
    let mut result = VoidPaymentResult::default();

    match response.response_type {
        ResponseType::Accepted => {
            result.new_payment_status = PaymentStatus::Voided;
        }
        ResponseType::Declined => {
            result.add_error(format!("Payment void declined. {}", response.error_pair()));
        }
        ResponseType::Error => {
            result.add_error(format!("Payment void error. {}", response.error_pair()));
        }
        ResponseType::Timeout => {
            result.add_error(format!(
                "Payment void timeout. Please try again. {}",
                response.error_pair()
            ));
        }
        ResponseType::HttpException => {
            result.add_error(format!(
                "Communication error. Please try again. {}",
                response.error_pair()
            ));
        }
    }

    result
}

/// Amount as the gateway expects it, rounded to two decimals
fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn billing_block(address: &Address) -> BillingAddress {
    BillingAddress {
        first_name: address.first_name.clone(),
        last_name: address.last_name.clone(),
        company: address.company.clone(),
        street: address.address1.clone(),
        street2: address.address2.clone(),
        city: address.city.clone(),
        state: address.state_abbreviation.clone(),
        zip: address.zip_postal_code.clone(),
        country: address.country_code.clone(),
        phone: address.phone_number.clone(),
    }
}

fn shipping_block(address: &Address) -> ShippingAddress {
    ShippingAddress {
        first_name: address.first_name.clone(),
        last_name: address.last_name.clone(),
        company: address.company.clone(),
        street: address.address1.clone(),
        street2: address.address2.clone(),
        city: address.city.clone(),
        state: address.state_abbreviation.clone(),
        zip: address.zip_postal_code.clone(),
        country: address.country_code.clone(),
        phone: address.phone_number.clone(),
    }
}

#[async_trait]
impl PaymentMethod for CardknoxPaymentProcessor {
    async fn process_payment(
        &self,
        request: ProcessPaymentRequest,
    ) -> Result<ProcessPaymentResult> {
        let (client, settings) = self.prepare_client(request.store_id).await?;

        info!(
            store_id = request.store_id,
            order_guid = %request.order_guid,
            mode = %settings.transact_mode,
            "Processing card payment"
        );

        let card = &request.credit_card;
        let billing = &request.billing_address;

        let mut gateway_request = PaymentRequest {
            cardholder_name: card.cardholder_name.clone(),
            card_number: card.card_number.clone(),
            card_expiry: Secret::new(card_expiry(card.expire_month, card.expire_year)),
            card_code: card.card_code.clone(),
            amount: format_amount(request.order_total),
            invoice: request.order_guid.to_string(),
            email: billing.email.clone(),
            customer_ip: request.customer_ip.clone(),
            street: billing.address1.clone(),
            zip: billing.zip_postal_code.clone(),
            customer_receipt: settings.send_receipt_to_customer,
            billing_address: None,
            shipping_address: None,
        };

        if !settings.hide_address_details {
            let billing_source = if settings.use_shipping_address_as_billing {
                match request.shipping_address.as_ref() {
                    Some(shipping) => shipping,
                    None => {
                        debug!(
                            order_guid = %request.order_guid,
                            "Order has no shipping address, billing address used instead"
                        );
                        billing
                    }
                }
            } else {
                billing
            };

            gateway_request.billing_address = Some(billing_block(billing_source));
            gateway_request.shipping_address = request.shipping_address.as_ref().map(shipping_block);
        }

        let response = match settings.transact_mode {
            TransactMode::Authorize => client.auth_only(&gateway_request).await,
            TransactMode::AuthorizeAndCapture => client.sale(&gateway_request).await,
        };

        Ok(map_process_response(settings.transact_mode, &response))
    }

    async fn capture(&self, request: CapturePaymentRequest) -> Result<CapturePaymentResult> {
        let (client, _) = self.prepare_client(request.store_id).await?;

        let reference_number = request
            .order
            .authorization_transaction_id
            .clone()
            .ok_or_else(|| {
                AppError::validation("Order has no authorization transaction to capture")
            })?;

        info!(
            store_id = request.store_id,
            reference_number = %reference_number,
            "Capturing authorized payment"
        );

        let response = client.capture(&CaptureRequest { reference_number }).await;
        Ok(map_capture_response(&response))
    }

    async fn refund(&self, request: RefundPaymentRequest) -> Result<RefundPaymentResult> {
        let (client, _) = self.prepare_client(request.store_id).await?;

        let reference_number = request
            .order
            .capture_transaction_id
            .clone()
            .ok_or_else(|| AppError::validation("Order has no captured transaction to refund"))?;

        info!(
            store_id = request.store_id,
            reference_number = %reference_number,
            amount = %request.amount_to_refund,
            is_partial = request.is_partial_refund,
            "Refunding captured payment"
        );

        let response = client
            .refund(&RefundRequest {
                reference_number,
                amount: format_amount(request.amount_to_refund),
            })
            .await;
        Ok(map_refund_response(request.is_partial_refund, &response))
    }

    async fn void(&self, request: VoidPaymentRequest) -> Result<VoidPaymentResult> {
        let (client, _) = self.prepare_client(request.store_id).await?;

        let reference_number = request
            .order
            .authorization_transaction_id
            .clone()
            .ok_or_else(|| AppError::validation("Order has no authorization transaction to void"))?;

        info!(
            store_id = request.store_id,
            reference_number = %reference_number,
            "Voiding authorized payment"
        );

        let response = client.void(&VoidRequest { reference_number }).await;
        Ok(map_void_response(&response))
    }

    async fn process_recurring_payment(
        &self,
        _request: ProcessPaymentRequest,
    ) -> Result<ProcessPaymentResult> {
        // Recurring billing is not supported; the empty result means no-op
        Ok(ProcessPaymentResult::default())
    }

    async fn cancel_recurring_payment(
        &self,
        _request: CancelRecurringPaymentRequest,
    ) -> Result<CancelRecurringPaymentResult> {
        Ok(CancelRecurringPaymentResult::default())
    }

    async fn post_process_payment(&self, _order: &OrderPaymentInfo) -> Result<()> {
        Ok(())
    }

    fn can_repost_process_payment(&self, _order: &OrderPaymentInfo) -> bool {
        false
    }

    fn validate_payment_form(&self, form: &PaymentForm) -> Vec<String> {
        PaymentFormValidator::validate(form)
    }

    fn get_payment_info(&self, form: &PaymentForm) -> Result<CreditCardInfo> {
        PaymentFormValidator::payment_info(form)
    }

    async fn additional_handling_fee(
        &self,
        store_id: i64,
        cart_total: Decimal,
    ) -> Result<Decimal> {
        let settings = self.settings.load_cardknox_settings(store_id).await?;
        Ok(calculate_additional_fee(
            cart_total,
            settings.additional_fee,
            settings.additional_fee_percentage,
        ))
    }

    fn hide_payment_method(&self) -> bool {
        false
    }

    fn configuration_page_url(&self) -> String {
        "/admin/payments/cardknox/configure".to_string()
    }

    async fn payment_method_description(&self) -> Result<String> {
        self.locales
            .get_or("payments.cardknox.description", "Pay by credit card")
            .await
    }

    fn supports_capture(&self) -> bool {
        true
    }

    fn supports_refund(&self) -> bool {
        true
    }

    fn supports_partial_refund(&self) -> bool {
        true
    }

    fn supports_void(&self) -> bool {
        true
    }

    fn recurring_payment_type(&self) -> RecurringPaymentType {
        RecurringPaymentType::NotSupported
    }

    fn payment_method_type(&self) -> PaymentMethodType {
        PaymentMethodType::Standard
    }

    fn skip_payment_info(&self) -> bool {
        false
    }

    async fn install(&self) -> Result<()> {
        self.settings
            .save_cardknox_settings(&CardknoxSettings::default(), 0)
            .await?;
        self.locales.install_resources(LOCALE_RESOURCES).await?;
        self.settings.clear_cache().await;

        info!("Cardknox payment method installed");
        Ok(())
    }

    async fn uninstall(&self) -> Result<()> {
        let removed_settings = self.settings.delete_settings_by_prefix(keys::PREFIX).await?;
        let removed_locales = self.locales.delete_by_prefix(keys::PREFIX).await?;
        self.settings.clear_cache().await;

        info!(
            removed_settings = removed_settings,
            removed_locales = removed_locales,
            "Cardknox payment method uninstalled"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        SYSTEM_NAME
    }
}
