#![warn(clippy::pedantic)]

use wasm_bindgen::JsValue;
use web_sys::Document;

pub mod config;
pub mod format;
pub mod loader;
pub mod log;
pub mod navigation;
pub mod service;
pub mod toast;

pub use config::{Config, ConfigRepository, ConfigService};
pub use format::{format_date, format_datetime, format_duration};
pub use loader::Loader;
pub use navigation::{BrowserNavigator, Navigator};
pub use service::Service;
pub use toast::{ToastKind, Toasts};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("failed to get window")]
    NoWindow,
    #[error("failed to get document")]
    NoDocument,
    #[error("failed to get document body")]
    NoBody,
    #[error("{0}")]
    Dom(String),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Dom(format!("{value:?}"))
    }
}

/// # Errors
///
/// Returns an error outside of a browser window.
pub fn document() -> Result<Document, UiError> {
    web_sys::window()
        .ok_or(UiError::NoWindow)?
        .document()
        .ok_or(UiError::NoDocument)
}
