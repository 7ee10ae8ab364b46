pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{CardknoxSettings, ConfigurationModel, TransactMode};
pub use repositories::{SettingRecord, SettingRepository};
pub use services::SettingService;
