//! Widget Errors
//!
//! Errors surfaced at widget boundaries. None of them propagate past a
//! widget: they are logged and the widget degrades to a stale or blank display.

use wasm_bindgen::JsValue;

/// Common result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// Fetch rejected or answered with a non-2xx status
    NetworkFailure(String),
    /// Body is not JSON or lacks the expected fields
    MalformedResponse(String),
    /// Target element is absent; the widget stays inactive
    MissingElement(String),
    Storage(String),
    /// A JS collaborator (QRCode, Chart) threw
    Binding(String),
}

impl WidgetError {
    pub fn is_missing_element(&self) -> bool {
        matches!(self, WidgetError::MissingElement(_))
    }
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetError::NetworkFailure(msg) => write!(f, "Network failure: {}", msg),
            WidgetError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            WidgetError::MissingElement(id) => write!(f, "Missing element: #{}", id),
            WidgetError::Storage(msg) => write!(f, "Storage error: {}", msg),
            WidgetError::Binding(msg) => write!(f, "Binding error: {}", msg),
        }
    }
}

impl std::error::Error for WidgetError {}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::MalformedResponse(e.to_string())
    }
}

impl From<gloo_net::Error> for WidgetError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => WidgetError::MalformedResponse(e.to_string()),
            other => WidgetError::NetworkFailure(other.to_string()),
        }
    }
}

/// Render a thrown JS value for log output
pub fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
