//! Collaborator Traits
//!
//! Widgets talk to the browser only through these interfaces.
//! The web-sys implementations live in `crate::browser`; tests use fakes.

use std::future::Future;

use crate::error::WidgetResult;
use crate::models::{AggregateCounts, Theme, TokenResponse};
use crate::widgets::ChartConfig;

/// Origin-scoped string storage that survives reloads
pub trait KeyValueStore {
    /// Read failures are reported as `None`
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> WidgetResult<()>;
}

/// Document-level theme flag and the optional toggle control
pub trait ThemeSurface {
    fn set_theme(&self, theme: Theme);

    /// Update the toggle's pressed state and label.
    /// Returns false when the page has no toggle control.
    fn set_toggle_state(&self, pressed: bool, label: &str) -> bool;
}

/// Draws a QR code for `text` into its container
pub trait QrRenderer {
    /// Replaces whatever the container held before
    fn render(&self, text: &str, size: u32) -> WidgetResult<()>;
}

/// Draws a chart into its canvas
pub trait ChartSurface {
    fn render(&self, config: &ChartConfig) -> WidgetResult<()>;
}

pub trait TokenSource {
    async fn fetch_token(&self) -> WidgetResult<TokenResponse>;
}

pub trait CountsSource {
    async fn fetch_counts(&self) -> WidgetResult<AggregateCounts>;
}

/// Task spawning and repeating timers
pub trait Runtime: 'static {
    /// Cancels the timer when dropped
    type Interval: 'static;

    fn spawn(&self, task: impl Future<Output = ()> + 'static);

    fn every(&self, period_ms: u32, tick: impl FnMut() + 'static) -> Self::Interval;
}

/// One row of a filterable table
pub trait FilterRow {
    fn text(&self) -> String;

    fn set_visible(&self, visible: bool);
}

/// Server-side token rotation (admin only)
pub trait TokenInvalidator {
    async fn invalidate(&self, password: &str) -> WidgetResult<TokenResponse>;
}
