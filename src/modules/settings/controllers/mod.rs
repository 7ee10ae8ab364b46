pub mod configure_controller;

pub use configure_controller::configure;
