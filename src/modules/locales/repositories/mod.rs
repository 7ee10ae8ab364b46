pub mod locale_repository;

pub use locale_repository::{LocaleRepository, LocaleResource};
