use std::collections::HashMap;
use std::str::FromStr;

use masking::{PeekInterface, Secret};
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::settings::models::cardknox_settings::{keys, CardknoxSettings};
use crate::modules::settings::repositories::setting_repository::SettingRepository;

type SettingMap = HashMap<(String, i64), String>;

/// Cached view over the per-store settings store
///
/// Reads go through an in-memory map of every row, loaded lazily and
/// invalidated by `clear_cache`. Writes go to the database only; callers
/// batch their saves and clear the cache once at the end.
pub struct SettingService {
    repository: SettingRepository,
    cache: RwLock<Option<SettingMap>>,
}

impl SettingService {
    pub fn new(repository: SettingRepository) -> Self {
        Self {
            repository,
            cache: RwLock::new(None),
        }
    }

    /// Raw setting lookup with store fallback: `(name, store)` wins over
    /// `(name, 0)`
    pub async fn get_setting(&self, name: &str, store_id: i64) -> Result<Option<String>> {
        {
            let cache = self.cache.read().await;
            if let Some(map) = cache.as_ref() {
                return Ok(Self::lookup(map, name, store_id));
            }
        }

        let map = self.load_map().await?;
        let value = Self::lookup(&map, name, store_id);
        *self.cache.write().await = Some(map);
        Ok(value)
    }

    /// Typed setting lookup; a present but unparseable value is a
    /// configuration error, not a silent default
    pub async fn get_parsed<T: FromStr>(&self, name: &str, store_id: i64) -> Result<Option<T>> {
        match self.get_setting(name, store_id).await? {
            Some(value) => value.parse::<T>().map(Some).map_err(|_| {
                AppError::configuration(format!("Invalid value for setting {}", name))
            }),
            None => Ok(None),
        }
    }

    /// Whether a row exists at exactly this store scope (no fallback);
    /// drives the admin override checkboxes
    pub async fn setting_exists(&self, name: &str, store_id: i64) -> Result<bool> {
        {
            let cache = self.cache.read().await;
            if let Some(map) = cache.as_ref() {
                return Ok(map.contains_key(&(name.to_string(), store_id)));
            }
        }

        let map = self.load_map().await?;
        let exists = map.contains_key(&(name.to_string(), store_id));
        *self.cache.write().await = Some(map);
        Ok(exists)
    }

    /// Write a setting at the given store scope
    pub async fn save_setting(&self, name: &str, value: &str, store_id: i64) -> Result<()> {
        self.repository.upsert(name, store_id, value).await
    }

    /// Write a setting honoring its per-store override flag: the value is
    /// stored when overridden (or when configuring all stores), and the
    /// store-scoped row is removed otherwise so the all-stores value applies
    pub async fn save_setting_overridable_per_store(
        &self,
        name: &str,
        value: &str,
        override_for_store: bool,
        store_id: i64,
    ) -> Result<()> {
        if override_for_store || store_id == 0 {
            self.repository.upsert(name, store_id, value).await
        } else {
            self.repository.delete(name, store_id).await
        }
    }

    /// Remove every setting under a name prefix
    pub async fn delete_settings_by_prefix(&self, prefix: &str) -> Result<u64> {
        self.repository.delete_by_prefix(prefix).await
    }

    /// Drop the cached map; the next read reloads from the database
    pub async fn clear_cache(&self) {
        *self.cache.write().await = None;
    }

    /// Cardknox method settings for a store scope, defaults where unset
    pub async fn load_cardknox_settings(&self, store_id: i64) -> Result<CardknoxSettings> {
        let defaults = CardknoxSettings::default();

        Ok(CardknoxSettings {
            transact_mode: self
                .get_parsed(keys::TRANSACT_MODE, store_id)
                .await?
                .unwrap_or(defaults.transact_mode),
            transaction_key: self
                .get_setting(keys::TRANSACTION_KEY, store_id)
                .await?
                .map(Secret::new)
                .unwrap_or(defaults.transaction_key),
            software_name: self
                .get_setting(keys::SOFTWARE_NAME, store_id)
                .await?
                .unwrap_or(defaults.software_name),
            software_version: self
                .get_setting(keys::SOFTWARE_VERSION, store_id)
                .await?
                .unwrap_or(defaults.software_version),
            override_api_version: self
                .get_parsed(keys::OVERRIDE_API_VERSION, store_id)
                .await?
                .unwrap_or(defaults.override_api_version),
            api_version: self
                .get_setting(keys::API_VERSION, store_id)
                .await?
                .unwrap_or(defaults.api_version),
            use_shipping_address_as_billing: self
                .get_parsed(keys::USE_SHIPPING_ADDRESS_AS_BILLING, store_id)
                .await?
                .unwrap_or(defaults.use_shipping_address_as_billing),
            hide_address_details: self
                .get_parsed(keys::HIDE_ADDRESS_DETAILS, store_id)
                .await?
                .unwrap_or(defaults.hide_address_details),
            send_receipt_to_customer: self
                .get_parsed(keys::SEND_RECEIPT_TO_CUSTOMER, store_id)
                .await?
                .unwrap_or(defaults.send_receipt_to_customer),
            additional_fee: self
                .get_parsed(keys::ADDITIONAL_FEE, store_id)
                .await?
                .unwrap_or(defaults.additional_fee),
            additional_fee_percentage: self
                .get_parsed(keys::ADDITIONAL_FEE_PERCENTAGE, store_id)
                .await?
                .unwrap_or(defaults.additional_fee_percentage),
        })
    }

    /// Write every Cardknox setting at the given store scope; used when the
    /// method is installed
    pub async fn save_cardknox_settings(
        &self,
        settings: &CardknoxSettings,
        store_id: i64,
    ) -> Result<()> {
        self.save_setting(
            keys::TRANSACT_MODE,
            &settings.transact_mode.to_string(),
            store_id,
        )
        .await?;
        self.save_setting(
            keys::TRANSACTION_KEY,
            settings.transaction_key.peek(),
            store_id,
        )
        .await?;
        self.save_setting(keys::SOFTWARE_NAME, &settings.software_name, store_id)
            .await?;
        self.save_setting(keys::SOFTWARE_VERSION, &settings.software_version, store_id)
            .await?;
        self.save_setting(
            keys::OVERRIDE_API_VERSION,
            &settings.override_api_version.to_string(),
            store_id,
        )
        .await?;
        self.save_setting(keys::API_VERSION, &settings.api_version, store_id)
            .await?;
        self.save_setting(
            keys::USE_SHIPPING_ADDRESS_AS_BILLING,
            &settings.use_shipping_address_as_billing.to_string(),
            store_id,
        )
        .await?;
        self.save_setting(
            keys::HIDE_ADDRESS_DETAILS,
            &settings.hide_address_details.to_string(),
            store_id,
        )
        .await?;
        self.save_setting(
            keys::SEND_RECEIPT_TO_CUSTOMER,
            &settings.send_receipt_to_customer.to_string(),
            store_id,
        )
        .await?;
        self.save_setting(
            keys::ADDITIONAL_FEE,
            &settings.additional_fee.to_string(),
            store_id,
        )
        .await?;
        self.save_setting(
            keys::ADDITIONAL_FEE_PERCENTAGE,
            &settings.additional_fee_percentage.to_string(),
            store_id,
        )
        .await?;

        Ok(())
    }

    async fn load_map(&self) -> Result<SettingMap> {
        let records = self.repository.load_all().await?;
        let mut map = SettingMap::with_capacity(records.len());
        for record in records {
            map.insert((record.name, record.store_id), record.value);
        }
        Ok(map)
    }

    fn lookup(map: &SettingMap, name: &str, store_id: i64) -> Option<String> {
        if let Some(value) = map.get(&(name.to_string(), store_id)) {
            return Some(value.clone());
        }
        if store_id != 0 {
            return map.get(&(name.to_string(), 0)).cloned();
        }
        None
    }
}
