pub mod setting_service;

pub use setting_service::SettingService;
