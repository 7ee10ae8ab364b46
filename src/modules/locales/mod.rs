pub mod repositories;
pub mod services;

pub use repositories::{LocaleRepository, LocaleResource};
pub use services::LocaleService;
