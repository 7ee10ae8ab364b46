pub mod locale_service;

pub use locale_service::LocaleService;
