pub mod setting_repository;

pub use setting_repository::{SettingRecord, SettingRepository};
