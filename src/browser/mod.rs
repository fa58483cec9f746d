//! Browser Adapters
//!
//! web-sys implementations of the collaborator traits, plus element lookup
//! helpers shared by the boot code.

mod bindings;
mod dom;
mod runtime;
mod storage;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget};

use crate::config::{WidgetConfig, CONFIG_ELEMENT_ID};
use crate::error::{describe_js, WidgetError, WidgetResult};

pub use bindings::{ChartCanvas, QrContainer};
pub use dom::{table_rows, BodyThemeSurface, TableRow};
pub use runtime::BrowserRuntime;
pub use storage::LocalStore;

pub fn document() -> WidgetResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| WidgetError::MissingElement("document".into()))
}

/// Look up `#id` as a specific element type
pub fn element_by_id<T: JsCast>(id: &str) -> WidgetResult<T> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| WidgetError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| WidgetError::MissingElement(format!("{} (unexpected element type)", id)))
}

/// `window.location.origin`
pub fn origin() -> WidgetResult<String> {
    web_sys::window()
        .ok_or_else(|| WidgetError::MissingElement("window".into()))?
        .location()
        .origin()
        .map_err(|e| WidgetError::Binding(describe_js(&e)))
}

/// Attach a listener for the lifetime of the page
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> WidgetResult<()> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| WidgetError::Binding(describe_js(&e)))?;
    closure.forget();
    Ok(())
}

/// Defaults, overridden by the page's `#widget-config` block if any
pub fn load_config() -> WidgetConfig {
    let text = document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match text {
        None => WidgetConfig::default(),
        Some(text) => WidgetConfig::from_json(&text).unwrap_or_else(|e| {
            log::warn!(target: "config", "ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            WidgetConfig::default()
        }),
    }
}
