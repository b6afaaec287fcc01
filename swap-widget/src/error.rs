//! # Widget Error Handling
//!
//! [`WidgetError`] is the one error type used across the widget. Faults raised while the
//! composed subtree renders or updates are routed through
//! [`FaultBoundary`](crate::composition::boundary::FaultBoundary), which hands them to the
//! host page's `on_error` callback instead of letting them escape.
//!
//! ## Error Categories
//!
//! - **Config**: options that could not be read (bad JS object, unparsable query value)
//! - **Render**: a descendant component failed to produce its view
//! - **Panic**: a descendant panicked while the boundary was supervising it
//! - **TokenList**: a remote token list could not be fetched or parsed
//! - **Provider**: the injected chain provider rejected or failed a request
//!
//! Cross-frame messaging has no variant: posting a resize notification never fails
//! observably.

use thiserror::Error;

/// Convenience type alias for `Result<T, WidgetError>`.
pub type Result<T> = std::result::Result<T, WidgetError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Panic: {0}")]
    Panic(String),

    #[error("Token list error: {0}")]
    TokenList(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl WidgetError {
    /// Short variant name, used as the error code handed to JS callbacks.
    pub fn code(&self) -> &'static str {
        match self {
            WidgetError::Config(_) => "Config",
            WidgetError::Render(_) => "Render",
            WidgetError::Panic(_) => "Panic",
            WidgetError::TokenList(_) => "TokenList",
            WidgetError::Provider(_) => "Provider",
        }
    }
}

impl From<shared::TokenListError> for WidgetError {
    fn from(err: shared::TokenListError) -> Self {
        WidgetError::TokenList(err.to_string())
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::Config(format!("JSON error: {}", err))
    }
}

impl From<serde_wasm_bindgen::Error> for WidgetError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WidgetError::Config(err.to_string())
    }
}

impl From<gloo_net::Error> for WidgetError {
    fn from(err: gloo_net::Error) -> Self {
        WidgetError::TokenList(err.to_string())
    }
}
