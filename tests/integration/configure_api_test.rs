/// Integration tests for the admin configuration API
///
/// Boots the actix application against a real MySQL database and drives
/// the configure, install and uninstall endpoints end to end. API key
/// authentication is covered by its own middleware tests; these mount the
/// admin scope directly so the configuration semantics stay in focus.
use std::sync::Arc;

use actix_web::{test, web, App};

use payknox::config::CardknoxConfig;
use payknox::modules::locales::repositories::LocaleRepository;
use payknox::modules::locales::services::LocaleService;
use payknox::modules::payments::services::{CardknoxPaymentProcessor, PaymentMethodRegistry};
use payknox::modules::settings::models::{keys, CardknoxSettings, ConfigurationModel, TransactMode};
use payknox::modules::settings::repositories::SettingRepository;
use payknox::modules::settings::services::SettingService;
use payknox::modules::settings;

mod database_setup;
use database_setup::setup_test_db;

struct TestServices {
    settings: Arc<SettingService>,
    locales: Arc<LocaleService>,
    registry: Arc<PaymentMethodRegistry>,
}

fn build_services(pool: sqlx::MySqlPool) -> TestServices {
    let settings = Arc::new(SettingService::new(SettingRepository::new(pool.clone())));
    let locales = Arc::new(LocaleService::new(LocaleRepository::new(pool)));

    let gateway = CardknoxConfig {
        base_url: "https://x1.cardknox.com".to_string(),
        timeout_secs: 30,
    };
    let mut registry = PaymentMethodRegistry::new();
    registry.register_method(Arc::new(CardknoxPaymentProcessor::new(
        settings.clone(),
        locales.clone(),
        gateway,
    )));

    TestServices {
        settings,
        locales,
        registry: Arc::new(registry),
    }
}

macro_rules! admin_app {
    ($services:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($services.settings.clone()))
                .app_data(web::Data::new($services.locales.clone()))
                .app_data(web::Data::new($services.registry.clone()))
                .service(web::scope("/admin").configure(settings::configure)),
        )
        .await
    };
}

#[actix_web::test]
#[ignore] // Requires MySQL connection
async fn test_get_configuration_returns_defaults() {
    let db = setup_test_db().await;
    let services = build_services(db.pool.clone());
    let app = admin_app!(services);

    let request = test::TestRequest::get()
        .uri("/admin/payments/cardknox/configure")
        .to_request();
    let model: ConfigurationModel = test::call_and_read_body_json(&app, request).await;

    assert_eq!(model.active_store_scope, 0);
    assert_eq!(model.transact_mode, TransactMode::Authorize);
    assert_eq!(model.software_version, "Default");
    assert!(!model.transact_mode_override_for_store);

    db.cleanup().await;
}

#[actix_web::test]
#[ignore] // Requires MySQL connection
async fn test_save_configuration_round_trips() {
    let db = setup_test_db().await;
    let services = build_services(db.pool.clone());
    let app = admin_app!(services);

    let mut model = ConfigurationModel::from_settings(&CardknoxSettings::default(), 0);
    model.transact_mode = TransactMode::AuthorizeAndCapture;
    model.transaction_key = "sandbox-key".to_string();
    model.send_receipt_to_customer = true;

    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/configure")
        .set_json(&model)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    let request = test::TestRequest::get()
        .uri("/admin/payments/cardknox/configure")
        .to_request();
    let saved: ConfigurationModel = test::call_and_read_body_json(&app, request).await;
    assert_eq!(saved.transact_mode, TransactMode::AuthorizeAndCapture);
    assert_eq!(saved.transaction_key, "sandbox-key");
    assert!(saved.send_receipt_to_customer);

    db.cleanup().await;
}

#[actix_web::test]
#[ignore] // Requires MySQL connection
async fn test_store_scope_override_flags() {
    let db = setup_test_db().await;
    let services = build_services(db.pool.clone());
    let app = admin_app!(services);

    // Configure all stores first
    let model = ConfigurationModel::from_settings(&CardknoxSettings::default(), 0);
    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/configure")
        .set_json(&model)
        .to_request();
    assert!(test::call_service(&app, request).await.status().is_success());

    // Override only the transaction key for store 2
    let mut store_model = ConfigurationModel::from_settings(&CardknoxSettings::default(), 2);
    store_model.transaction_key = "store-two-key".to_string();
    store_model.transaction_key_override_for_store = true;

    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/configure?store_scope=2")
        .set_json(&store_model)
        .to_request();
    assert!(test::call_service(&app, request).await.status().is_success());

    let request = test::TestRequest::get()
        .uri("/admin/payments/cardknox/configure?store_scope=2")
        .to_request();
    let loaded: ConfigurationModel = test::call_and_read_body_json(&app, request).await;

    assert_eq!(loaded.active_store_scope, 2);
    assert_eq!(loaded.transaction_key, "store-two-key");
    assert!(loaded.transaction_key_override_for_store);
    assert!(
        !loaded.software_name_override_for_store,
        "fields without an override must report inherited"
    );

    // Store 3 keeps the all-stores key
    let request = test::TestRequest::get()
        .uri("/admin/payments/cardknox/configure?store_scope=3")
        .to_request();
    let other: ConfigurationModel = test::call_and_read_body_json(&app, request).await;
    assert_eq!(other.transaction_key, "");
    assert!(!other.transaction_key_override_for_store);

    db.cleanup().await;
}

#[actix_web::test]
#[ignore] // Requires MySQL connection
async fn test_install_seeds_settings_and_locales() {
    let db = setup_test_db().await;
    let services = build_services(db.pool.clone());
    let app = admin_app!(services);

    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/install")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    services.settings.clear_cache().await;
    assert!(
        services
            .settings
            .setting_exists(keys::TRANSACT_MODE, 0)
            .await
            .unwrap(),
        "install must seed the default settings"
    );

    let resources = services
        .locales
        .list_by_prefix("payments.cardknox.")
        .await
        .unwrap();
    assert_eq!(resources.len(), 19, "install seeds the full resource set");
    assert!(resources
        .iter()
        .any(|r| r.name == "payments.cardknox.description" && r.value == "Pay by credit card"));

    db.cleanup().await;
}

#[actix_web::test]
#[ignore] // Requires MySQL connection
async fn test_uninstall_removes_settings_and_locales() {
    let db = setup_test_db().await;
    let services = build_services(db.pool.clone());
    let app = admin_app!(services);

    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/install")
        .to_request();
    assert!(test::call_service(&app, request).await.status().is_success());

    // A store-scoped override must also disappear on uninstall
    services
        .settings
        .save_setting(keys::TRANSACTION_KEY, "store-key", 2)
        .await
        .unwrap();

    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/uninstall")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    services.settings.clear_cache().await;
    assert!(!services
        .settings
        .setting_exists(keys::TRANSACT_MODE, 0)
        .await
        .unwrap());
    assert!(!services
        .settings
        .setting_exists(keys::TRANSACTION_KEY, 2)
        .await
        .unwrap());

    let resources = services
        .locales
        .list_by_prefix("payments.cardknox.")
        .await
        .unwrap();
    assert!(resources.is_empty(), "uninstall removes every locale resource");

    db.cleanup().await;
}

#[actix_web::test]
#[ignore] // Requires MySQL connection
async fn test_locales_endpoint_lists_installed_resources() {
    let db = setup_test_db().await;
    let services = build_services(db.pool.clone());
    let app = admin_app!(services);

    let request = test::TestRequest::post()
        .uri("/admin/payments/cardknox/install")
        .to_request();
    assert!(test::call_service(&app, request).await.status().is_success());

    let request = test::TestRequest::get()
        .uri("/admin/payments/cardknox/locales")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let resources = body.as_array().expect("locales response should be an array");
    assert_eq!(resources.len(), 19);

    db.cleanup().await;
}
