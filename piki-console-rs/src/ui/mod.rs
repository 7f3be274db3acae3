//! Terminal user interface

pub mod display;
pub mod formatter;
pub mod interactive;

pub use formatter::Formatter;
pub use interactive::Interactive;

/// Banner shown above the menus
pub const APP_TITLE: &str = "Bienvenido a Piki. Tu envío, sin estrés.";
