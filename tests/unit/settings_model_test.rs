/// Unit tests for the merchant settings models
///
/// Covers the JSON surface of the admin configuration DTO, the transact
/// mode string representations, and the setting-name prefix that scopes
/// installation and removal.
use rust_decimal_macros::dec;

use payknox::modules::settings::models::{
    keys, CardknoxSettings, ConfigurationModel, TransactMode,
};

#[test]
fn test_transact_mode_serde_uses_snake_case() {
    assert_eq!(
        serde_json::to_value(TransactMode::Authorize).unwrap(),
        "authorize"
    );
    assert_eq!(
        serde_json::to_value(TransactMode::AuthorizeAndCapture).unwrap(),
        "authorize_and_capture"
    );

    let parsed: TransactMode = serde_json::from_str(r#""authorize_and_capture""#).unwrap();
    assert_eq!(parsed, TransactMode::AuthorizeAndCapture);
}

#[test]
fn test_transact_mode_display_matches_stored_value() {
    for mode in [TransactMode::Authorize, TransactMode::AuthorizeAndCapture] {
        let stored = mode.to_string();
        assert_eq!(stored.parse::<TransactMode>().unwrap(), mode);
        assert_eq!(serde_json::to_value(mode).unwrap(), stored.as_str());
    }
}

#[test]
fn test_configuration_model_deserializes_without_override_flags() {
    let model: ConfigurationModel = serde_json::from_str(
        r#"{
            "transact_mode": "authorize_and_capture",
            "transaction_key": "sandbox-key",
            "software_name": "payknox",
            "software_version": "1.0",
            "override_api_version": false,
            "api_version": "",
            "use_shipping_address_as_billing": true,
            "hide_address_details": false,
            "send_receipt_to_customer": true,
            "additional_fee": "2.50",
            "additional_fee_percentage": false
        }"#,
    )
    .unwrap();

    assert_eq!(model.active_store_scope, 0);
    assert_eq!(model.transact_mode, TransactMode::AuthorizeAndCapture);
    assert_eq!(model.transaction_key, "sandbox-key");
    assert_eq!(model.additional_fee, dec!(2.50));
    assert!(!model.transact_mode_override_for_store);
    assert!(!model.additional_fee_override_for_store);
}

#[test]
fn test_configuration_model_serde_round_trip() {
    let mut model = ConfigurationModel::from_settings(&CardknoxSettings::default(), 3);
    model.transaction_key = "key-3".to_string();
    model.transaction_key_override_for_store = true;
    model.additional_fee = dec!(1.25);

    let json = serde_json::to_string(&model).unwrap();
    let back: ConfigurationModel = serde_json::from_str(&json).unwrap();

    assert_eq!(back.active_store_scope, 3);
    assert_eq!(back.transaction_key, "key-3");
    assert!(back.transaction_key_override_for_store);
    assert_eq!(back.additional_fee, dec!(1.25));
    assert!(!back.software_name_override_for_store);
}

#[test]
fn test_from_settings_copies_every_field() {
    let settings = CardknoxSettings {
        transact_mode: TransactMode::AuthorizeAndCapture,
        transaction_key: masking::Secret::new("live-key".to_string()),
        software_name: "storefront".to_string(),
        software_version: "2.1".to_string(),
        override_api_version: true,
        api_version: "5.0.0".to_string(),
        use_shipping_address_as_billing: true,
        hide_address_details: true,
        send_receipt_to_customer: true,
        additional_fee: dec!(4.00),
        additional_fee_percentage: true,
    };

    let model = ConfigurationModel::from_settings(&settings, 0);
    assert_eq!(model.transact_mode, TransactMode::AuthorizeAndCapture);
    assert_eq!(model.transaction_key, "live-key");
    assert_eq!(model.software_name, "storefront");
    assert_eq!(model.software_version, "2.1");
    assert!(model.override_api_version);
    assert_eq!(model.api_version, "5.0.0");
    assert!(model.use_shipping_address_as_billing);
    assert!(model.hide_address_details);
    assert!(model.send_receipt_to_customer);
    assert_eq!(model.additional_fee, dec!(4.00));
    assert!(model.additional_fee_percentage);
}

#[test]
fn test_every_setting_key_lives_under_the_method_prefix() {
    let all = [
        keys::TRANSACT_MODE,
        keys::TRANSACTION_KEY,
        keys::SOFTWARE_NAME,
        keys::SOFTWARE_VERSION,
        keys::OVERRIDE_API_VERSION,
        keys::API_VERSION,
        keys::USE_SHIPPING_ADDRESS_AS_BILLING,
        keys::HIDE_ADDRESS_DETAILS,
        keys::SEND_RECEIPT_TO_CUSTOMER,
        keys::ADDITIONAL_FEE,
        keys::ADDITIONAL_FEE_PERCENTAGE,
    ];

    for key in all {
        assert!(
            key.starts_with(keys::PREFIX),
            "{} escapes the removal prefix",
            key
        );
    }

    let mut unique: Vec<&str> = all.to_vec();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), all.len(), "setting names must be distinct");
}
