use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::locales::services::locale_service::LocaleService;
use crate::modules::payments::services::method_registry::PaymentMethodRegistry;
use crate::modules::settings::models::cardknox_settings::{keys, ConfigurationModel};
use crate::modules::settings::services::setting_service::SettingService;

#[derive(Debug, Deserialize)]
pub struct StoreScopeQuery {
    #[serde(default)]
    pub store_scope: i64,
}

/// Load the Cardknox configuration for the active store scope
/// GET /admin/payments/cardknox/configure?store_scope=N
pub async fn get_configuration(
    settings: web::Data<Arc<SettingService>>,
    query: web::Query<StoreScopeQuery>,
) -> Result<HttpResponse, AppError> {
    let store_scope = query.store_scope;
    let cardknox = settings.load_cardknox_settings(store_scope).await?;
    let mut model = ConfigurationModel::from_settings(&cardknox, store_scope);

    // Override flags only make sense at a concrete store; the all-stores
    // scope has nothing to override
    if store_scope > 0 {
        model.transact_mode_override_for_store =
            settings.setting_exists(keys::TRANSACT_MODE, store_scope).await?;
        model.transaction_key_override_for_store =
            settings.setting_exists(keys::TRANSACTION_KEY, store_scope).await?;
        model.software_name_override_for_store =
            settings.setting_exists(keys::SOFTWARE_NAME, store_scope).await?;
        model.software_version_override_for_store =
            settings.setting_exists(keys::SOFTWARE_VERSION, store_scope).await?;
        model.override_api_version_override_for_store = settings
            .setting_exists(keys::OVERRIDE_API_VERSION, store_scope)
            .await?;
        model.api_version_override_for_store =
            settings.setting_exists(keys::API_VERSION, store_scope).await?;
        model.use_shipping_address_as_billing_override_for_store = settings
            .setting_exists(keys::USE_SHIPPING_ADDRESS_AS_BILLING, store_scope)
            .await?;
        model.hide_address_details_override_for_store = settings
            .setting_exists(keys::HIDE_ADDRESS_DETAILS, store_scope)
            .await?;
        model.send_receipt_to_customer_override_for_store = settings
            .setting_exists(keys::SEND_RECEIPT_TO_CUSTOMER, store_scope)
            .await?;
        model.additional_fee_override_for_store =
            settings.setting_exists(keys::ADDITIONAL_FEE, store_scope).await?;
        model.additional_fee_percentage_override_for_store = settings
            .setting_exists(keys::ADDITIONAL_FEE_PERCENTAGE, store_scope)
            .await?;
    }

    Ok(HttpResponse::Ok().json(model))
}

/// Save the Cardknox configuration for the active store scope
/// POST /admin/payments/cardknox/configure?store_scope=N
pub async fn save_configuration(
    settings: web::Data<Arc<SettingService>>,
    query: web::Query<StoreScopeQuery>,
    model: web::Json<ConfigurationModel>,
) -> Result<HttpResponse, AppError> {
    let store_scope = query.store_scope;
    let model = model.into_inner();

    // Each field is written at the active scope only when marked overridden
    // (or when configuring all stores) and removed from the scope otherwise,
    // so the all-stores value applies again
    settings
        .save_setting_overridable_per_store(
            keys::TRANSACT_MODE,
            &model.transact_mode.to_string(),
            model.transact_mode_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::TRANSACTION_KEY,
            &model.transaction_key,
            model.transaction_key_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::SOFTWARE_NAME,
            &model.software_name,
            model.software_name_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::SOFTWARE_VERSION,
            &model.software_version,
            model.software_version_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::OVERRIDE_API_VERSION,
            &model.override_api_version.to_string(),
            model.override_api_version_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::API_VERSION,
            &model.api_version,
            model.api_version_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::USE_SHIPPING_ADDRESS_AS_BILLING,
            &model.use_shipping_address_as_billing.to_string(),
            model.use_shipping_address_as_billing_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::HIDE_ADDRESS_DETAILS,
            &model.hide_address_details.to_string(),
            model.hide_address_details_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::SEND_RECEIPT_TO_CUSTOMER,
            &model.send_receipt_to_customer.to_string(),
            model.send_receipt_to_customer_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::ADDITIONAL_FEE,
            &model.additional_fee.to_string(),
            model.additional_fee_override_for_store,
            store_scope,
        )
        .await?;
    settings
        .save_setting_overridable_per_store(
            keys::ADDITIONAL_FEE_PERCENTAGE,
            &model.additional_fee_percentage.to_string(),
            model.additional_fee_percentage_override_for_store,
            store_scope,
        )
        .await?;

    // Cache is cleared once after the batch, not per setting
    settings.clear_cache().await;

    tracing::info!(store_scope = store_scope, "Cardknox configuration saved");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "The configuration has been saved successfully"
    })))
}

/// Seed default settings and locale resources
/// POST /admin/payments/cardknox/install
pub async fn install(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method("cardknox")?;
    method.install().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payment method installed"
    })))
}

/// Remove the method's settings and locale resources
/// POST /admin/payments/cardknox/uninstall
pub async fn uninstall(
    registry: web::Data<Arc<PaymentMethodRegistry>>,
) -> Result<HttpResponse, AppError> {
    let method = registry.get_method("cardknox")?;
    method.uninstall().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payment method uninstalled"
    })))
}

/// Installed locale resources backing the admin UI strings
/// GET /admin/payments/cardknox/locales
pub async fn list_locales(
    locales: web::Data<Arc<LocaleService>>,
) -> Result<HttpResponse, AppError> {
    let resources = locales.list_by_prefix("payments.cardknox.").await?;
    Ok(HttpResponse::Ok().json(resources))
}

/// Configure admin routes for the Cardknox payment method
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments/cardknox")
            .route("/configure", web::get().to(get_configuration))
            .route("/configure", web::post().to(save_configuration))
            .route("/install", web::post().to(install))
            .route("/uninstall", web::post().to(uninstall))
            .route("/locales", web::get().to(list_locales)),
    );
}
