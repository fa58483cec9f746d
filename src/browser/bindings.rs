//! JS Library Bindings
//!
//! The page loads qrcode.js and Chart.js as globals; these wrap their
//! constructors. A missing global throws, which surfaces as `Binding`.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::error::{describe_js, WidgetError, WidgetResult};
use crate::ports::{ChartSurface, QrRenderer};
use crate::widgets::ChartConfig;

#[wasm_bindgen]
extern "C" {
    type QRCode;

    #[wasm_bindgen(constructor, catch)]
    fn new(container: &HtmlElement, options: &JsValue) -> Result<QRCode, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, catch, js_class = "Chart")]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &ChartJs);
}

#[derive(Serialize)]
struct QrOptions<'a> {
    text: &'a str,
    width: u32,
    height: u32,
}

fn to_js<T: Serialize>(value: &T) -> WidgetResult<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| WidgetError::Binding(e.to_string()))
}

/// Element the QR image is drawn into
pub struct QrContainer(HtmlElement);

impl QrContainer {
    pub fn new(container: HtmlElement) -> Self {
        Self(container)
    }
}

impl QrRenderer for QrContainer {
    fn render(&self, text: &str, size: u32) -> WidgetResult<()> {
        self.0.set_inner_html("");
        let options = to_js(&QrOptions { text, width: size, height: size })?;
        QRCode::new(&self.0, &options)
            .map(|_| ())
            .map_err(|e| WidgetError::Binding(describe_js(&e)))
    }
}

/// Canvas holding at most one live chart; Chart.js refuses a second on the same canvas
pub struct ChartCanvas {
    canvas: HtmlCanvasElement,
    current: RefCell<Option<ChartJs>>,
}

impl ChartCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            current: RefCell::new(None),
        }
    }
}

impl ChartSurface for ChartCanvas {
    fn render(&self, config: &ChartConfig) -> WidgetResult<()> {
        let config = to_js(config)?;
        if let Some(previous) = self.current.borrow_mut().take() {
            previous.destroy();
        }
        let chart = ChartJs::new(&self.canvas, &config).map_err(|e| WidgetError::Binding(describe_js(&e)))?;
        *self.current.borrow_mut() = Some(chart);
        Ok(())
    }
}
