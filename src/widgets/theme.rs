//! Theme Controller
//!
//! Light/dark preference restored from storage on load and flipped by the
//! toggle button. Every transition (including the initial one) is applied to
//! the document, persisted and mirrored on the toggle control.

use std::cell::Cell;

use crate::config::WidgetConfig;
use crate::models::Theme;
use crate::ports::{KeyValueStore, ThemeSurface};

pub struct ThemeController<S> {
    storage: S,
    storage_key: String,
    light_label: String,
    dark_label: String,
    current: Cell<Theme>,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Restore the stored preference, defaulting to light
    pub fn new(storage: S, config: &WidgetConfig) -> Self {
        let stored = storage.get(&config.theme_storage_key);
        let current = Theme::from_stored(stored.as_deref());
        log::debug!(target: "theme", "restored {:?} (stored value {:?})", current, stored);
        Self {
            storage,
            storage_key: config.theme_storage_key.clone(),
            light_label: config.light_label.clone(),
            dark_label: config.dark_label.clone(),
            current: Cell::new(current),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Flip the preference. Call `apply_to` afterwards to make it visible.
    pub fn toggle(&self) -> Theme {
        let next = self.current.get().toggled();
        self.current.set(next);
        next
    }

    pub fn label(&self) -> &str {
        match self.current.get() {
            Theme::Light => &self.light_label,
            Theme::Dark => &self.dark_label,
        }
    }

    pub fn apply_to(&self, surface: &impl ThemeSurface) {
        let theme = self.current.get();
        surface.set_theme(theme);
        if let Err(e) = self.storage.set(&self.storage_key, theme.as_str()) {
            // Still applied to this page, just not remembered
            log::warn!(target: "theme", "could not persist {}: {}", theme.as_str(), e);
        }
        if !surface.set_toggle_state(theme.is_dark(), self.label()) {
            log::debug!(target: "theme", "no toggle control on this page");
        }
    }

    /// Click handler body
    pub fn toggle_and_apply(&self, surface: &impl ThemeSurface) -> Theme {
        let next = self.toggle();
        self.apply_to(surface);
        next
    }
}
