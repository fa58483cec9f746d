//! Widget Configuration
//!
//! Endpoints, element ids and timings. Every field has a default matching
//! the server's templates; a page may override any subset through a
//! `<script type="application/json" id="widget-config">` block.

use serde::Deserialize;

use crate::error::WidgetResult;

/// Id of the optional JSON config block
pub const CONFIG_ELEMENT_ID: &str = "widget-config";

const DEFAULT_POLL_INTERVAL_MS: u32 = 60_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub token_endpoint: String,
    pub charts_endpoint: String,
    pub invalidate_endpoint: String,
    pub admin_data_endpoint: String,
    /// Path the QR code points at, joined to the page origin
    pub attendance_path: String,
    pub poll_interval_ms: u32,
    /// QR width and height in CSS pixels
    pub qr_size: u32,

    pub theme_storage_key: String,
    /// Attribute set on `<body>`, consumed by the stylesheet
    pub theme_attribute: String,
    pub light_label: String,
    pub dark_label: String,

    // Element ids
    pub qr_element: String,
    pub theme_toggle_element: String,
    pub search_element: String,
    pub table_body_element: String,
    pub chart_element: String,
    pub status_element: String,
    pub invalidate_element: String,
    pub password_element: String,
    pub admin_chart_element: String,
    pub admin_name_element: String,
    pub admin_from_element: String,
    pub admin_to_element: String,
    /// Button that reloads the admin chart with the current filters
    pub admin_filter_element: String,

    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            token_endpoint: "/api/token".to_string(),
            charts_endpoint: "/api/graficos".to_string(),
            invalidate_endpoint: "/admin/invalidate_token".to_string(),
            admin_data_endpoint: "/admin/data".to_string(),
            attendance_path: "/presenca".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            qr_size: 260,
            theme_storage_key: "site-theme".to_string(),
            theme_attribute: "data-theme".to_string(),
            light_label: "Claro".to_string(),
            dark_label: "Escuro".to_string(),
            qr_element: "qrcode".to_string(),
            theme_toggle_element: "themeToggle".to_string(),
            search_element: "busca".to_string(),
            table_body_element: "tabela-corpo".to_string(),
            chart_element: "graficoSetores".to_string(),
            status_element: "token-status".to_string(),
            invalidate_element: "invalidarToken".to_string(),
            password_element: "senha".to_string(),
            admin_chart_element: "graficoAdmin".to_string(),
            admin_name_element: "filtroNome".to_string(),
            admin_from_element: "dateFrom".to_string(),
            admin_to_element: "dateTo".to_string(),
            admin_filter_element: "aplicarFiltros".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parse an override block; missing fields keep their defaults
    pub fn from_json(body: &str) -> WidgetResult<Self> {
        let config: WidgetConfig = serde_json::from_str(body)?;
        Ok(config.sanitized())
    }

    /// Replace values that would break a widget with their defaults
    pub fn sanitized(mut self) -> Self {
        if self.poll_interval_ms == 0 {
            log::warn!(target: "config", "poll_interval_ms must be positive, using {}", DEFAULT_POLL_INTERVAL_MS);
            self.poll_interval_ms = DEFAULT_POLL_INTERVAL_MS;
        }
        if self.qr_size == 0 {
            self.qr_size = WidgetConfig::default().qr_size;
        }
        self
    }

    pub fn label_for(&self, dark: bool) -> &str {
        if dark { &self.dark_label } else { &self.light_label }
    }
}
