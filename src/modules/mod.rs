pub mod cardknox;
pub mod health;
pub mod locales;
pub mod payments;
pub mod settings;
