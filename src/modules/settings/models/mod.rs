pub mod cardknox_settings;

pub use cardknox_settings::{keys, CardknoxSettings, ConfigurationModel, TransactMode};
