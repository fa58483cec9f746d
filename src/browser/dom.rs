//! DOM adapters for the theme and table widgets

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlTableSectionElement};

use crate::models::Theme;
use crate::ports::{FilterRow, ThemeSurface};

/// `<body data-theme=..>` plus the optional toggle button
pub struct BodyThemeSurface {
    body: Option<HtmlElement>,
    attribute: String,
    toggle: Option<HtmlElement>,
}

impl BodyThemeSurface {
    pub fn new(body: Option<HtmlElement>, attribute: &str, toggle: Option<HtmlElement>) -> Self {
        Self {
            body,
            attribute: attribute.to_string(),
            toggle,
        }
    }
}

impl ThemeSurface for BodyThemeSurface {
    fn set_theme(&self, theme: Theme) {
        if let Some(body) = &self.body {
            if let Err(e) = body.set_attribute(&self.attribute, theme.as_str()) {
                log::warn!(target: "theme", "setting {}: {:?}", self.attribute, e);
            }
        }
    }

    fn set_toggle_state(&self, pressed: bool, label: &str) -> bool {
        let Some(toggle) = &self.toggle else {
            return false;
        };
        if let Err(e) = toggle.set_attribute("aria-pressed", if pressed { "true" } else { "false" }) {
            log::warn!(target: "theme", "setting aria-pressed: {:?}", e);
        }
        toggle.set_inner_text(label);
        true
    }
}

pub struct TableRow(HtmlElement);

impl FilterRow for TableRow {
    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_visible(&self, visible: bool) {
        let style = self.0.style();
        let result = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
        if let Err(e) = result {
            log::warn!(target: "table_filter", "toggling row display: {:?}", e);
        }
    }
}

/// Current rows of a `<tbody>`
pub fn table_rows(body: &HtmlTableSectionElement) -> Vec<TableRow> {
    let rows = body.rows();
    (0..rows.length())
        .filter_map(|i| rows.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .map(TableRow)
        .collect()
}
