//! Payknox Card Payment Service Library
//!
//! This library provides a Cardknox-backed card payment method with
//! per-store merchant settings and an admin configuration surface.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::cardknox;
pub use modules::locales;
pub use modules::payments;
pub use modules::settings;
