//! Test Fakes
//!
//! In-memory stand-ins for the browser collaborators. Each fake is cheap to
//! clone and clones share state, so a test keeps one copy to inspect while
//! the widget owns another.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use crate::error::{WidgetError, WidgetResult};
use crate::models::{AggregateCounts, Theme, TokenResponse};
use crate::ports::{
    ChartSurface, CountsSource, FilterRow, KeyValueStore, QrRenderer, Runtime, ThemeSurface,
    TokenInvalidator, TokenSource,
};
use crate::widgets::ChartConfig;

pub fn token(value: &str) -> TokenResponse {
    TokenResponse {
        token: value.to_string(),
        ttl: None,
        contador: None,
    }
}

// ========================
// Runtime
// ========================

struct FakeTimer {
    period: u64,
    next_due: u64,
    tick: Box<dyn FnMut()>,
    cancelled: Rc<Cell<bool>>,
}

/// Single-threaded executor with a manually advanced clock
pub struct FakeRuntime {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    now: Cell<u64>,
    timers: RefCell<Vec<FakeTimer>>,
}

pub struct FakeInterval {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for FakeInterval {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl FakeRuntime {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
            now: Cell::new(0),
            timers: RefCell::new(Vec::new()),
        }
    }

    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Move the clock forward, firing due timers in order
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = self
                .timers
                .borrow()
                .iter()
                .enumerate()
                .filter(|(_, timer)| !timer.cancelled.get())
                .map(|(idx, timer)| (timer.next_due, idx))
                .min();
            let Some((due, idx)) = next.filter(|(due, _)| *due <= target) else {
                break;
            };
            self.now.set(due);
            let mut tick = {
                let mut timers = self.timers.borrow_mut();
                timers[idx].next_due += timers[idx].period;
                std::mem::replace(&mut timers[idx].tick, Box::new(|| {}))
            };
            tick();
            self.timers.borrow_mut()[idx].tick = tick;
            self.run_until_stalled();
        }
        self.now.set(target);
        self.run_until_stalled();
    }
}

impl Runtime for FakeRuntime {
    type Interval = FakeInterval;

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        self.spawner.spawn_local(task).expect("spawn on fake runtime");
    }

    fn every(&self, period_ms: u32, tick: impl FnMut() + 'static) -> FakeInterval {
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(FakeTimer {
            period: period_ms as u64,
            next_due: self.now.get() + period_ms as u64,
            tick: Box::new(tick),
            cancelled: Rc::clone(&cancelled),
        });
        FakeInterval { cancelled }
    }
}

// ========================
// Network sources
// ========================

enum Scripted<T> {
    Ready(WidgetResult<T>),
    Gate(oneshot::Receiver<WidgetResult<T>>),
}

async fn play<T>(next: Option<Scripted<T>>, fallback: impl FnOnce() -> WidgetResult<T>) -> WidgetResult<T> {
    match next {
        None => fallback(),
        Some(Scripted::Ready(result)) => result,
        Some(Scripted::Gate(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(WidgetError::NetworkFailure("request dropped".into()))),
    }
}

/// Token endpoint answering from a script, then `tok-<n>`
#[derive(Clone, Default)]
pub struct FakeTokens {
    calls: Rc<Cell<usize>>,
    script: Rc<RefCell<VecDeque<Scripted<TokenResponse>>>>,
}

impl FakeTokens {
    pub fn push(&self, result: WidgetResult<TokenResponse>) {
        self.script.borrow_mut().push_back(Scripted::Ready(result));
    }

    /// Next call waits until the sender fires
    pub fn gate(&self, rx: oneshot::Receiver<WidgetResult<TokenResponse>>) {
        self.script.borrow_mut().push_back(Scripted::Gate(rx));
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TokenSource for FakeTokens {
    async fn fetch_token(&self) -> WidgetResult<TokenResponse> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        let next = self.script.borrow_mut().pop_front();
        play(next, || Ok(token(&format!("tok-{}", n)))).await
    }
}

#[derive(Clone)]
pub struct FakeCounts {
    calls: Rc<Cell<usize>>,
    result: Rc<RefCell<WidgetResult<AggregateCounts>>>,
}

impl FakeCounts {
    pub fn answering(result: WidgetResult<AggregateCounts>) -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            result: Rc::new(RefCell::new(result)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Change what later fetches return
    pub fn answer(&self, result: WidgetResult<AggregateCounts>) {
        *self.result.borrow_mut() = result;
    }
}

impl CountsSource for FakeCounts {
    async fn fetch_counts(&self) -> WidgetResult<AggregateCounts> {
        self.calls.set(self.calls.get() + 1);
        self.result.borrow().clone()
    }
}

#[derive(Clone)]
pub struct FakeInvalidator {
    passwords: Rc<RefCell<Vec<String>>>,
    result: Rc<RefCell<WidgetResult<TokenResponse>>>,
}

impl FakeInvalidator {
    pub fn answering(result: WidgetResult<TokenResponse>) -> Self {
        Self {
            passwords: Rc::new(RefCell::new(Vec::new())),
            result: Rc::new(RefCell::new(result)),
        }
    }

    pub fn passwords(&self) -> Vec<String> {
        self.passwords.borrow().clone()
    }
}

impl TokenInvalidator for FakeInvalidator {
    async fn invalidate(&self, password: &str) -> WidgetResult<TokenResponse> {
        self.passwords.borrow_mut().push(password.to_string());
        self.result.borrow().clone()
    }
}

// ========================
// Rendering surfaces
// ========================

#[derive(Clone, Default)]
pub struct FakeQr {
    renders: Rc<RefCell<Vec<(String, u32)>>>,
    failure: Rc<RefCell<Option<WidgetError>>>,
}

impl FakeQr {
    pub fn fail_with(&self, err: WidgetError) {
        *self.failure.borrow_mut() = Some(err);
    }

    pub fn renders(&self) -> Vec<(String, u32)> {
        self.renders.borrow().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.renders.borrow().iter().map(|(text, _)| text.clone()).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.renders.borrow().last().map(|(text, _)| text.clone())
    }
}

impl QrRenderer for FakeQr {
    fn render(&self, text: &str, size: u32) -> WidgetResult<()> {
        if let Some(err) = self.failure.borrow().clone() {
            return Err(err);
        }
        self.renders.borrow_mut().push((text.to_string(), size));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeChart {
    configs: Rc<RefCell<Vec<ChartConfig>>>,
}

impl FakeChart {
    pub fn configs(&self) -> Vec<ChartConfig> {
        self.configs.borrow().clone()
    }
}

impl ChartSurface for FakeChart {
    fn render(&self, config: &ChartConfig) -> WidgetResult<()> {
        self.configs.borrow_mut().push(config.clone());
        Ok(())
    }
}

/// Document body plus an optional toggle button
#[derive(Clone)]
pub struct FakeSurface {
    has_toggle: bool,
    theme: Rc<Cell<Option<Theme>>>,
    toggle: Rc<RefCell<Option<(bool, String)>>>,
}

impl FakeSurface {
    pub fn with_toggle() -> Self {
        Self {
            has_toggle: true,
            theme: Rc::new(Cell::new(None)),
            toggle: Rc::new(RefCell::new(None)),
        }
    }

    pub fn without_toggle() -> Self {
        Self {
            has_toggle: false,
            ..Self::with_toggle()
        }
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme.get()
    }

    pub fn pressed(&self) -> Option<bool> {
        self.toggle.borrow().as_ref().map(|(pressed, _)| *pressed)
    }

    pub fn label(&self) -> Option<String> {
        self.toggle.borrow().as_ref().map(|(_, label)| label.clone())
    }
}

impl ThemeSurface for FakeSurface {
    fn set_theme(&self, theme: Theme) {
        self.theme.set(Some(theme));
    }

    fn set_toggle_state(&self, pressed: bool, label: &str) -> bool {
        if !self.has_toggle {
            return false;
        }
        *self.toggle.borrow_mut() = Some((pressed, label.to_string()));
        true
    }
}

// ========================
// Storage and rows
// ========================

#[derive(Clone, Default)]
pub struct FakeStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
    broken: Rc<Cell<bool>>,
}

impl FakeStorage {
    pub fn with(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.values.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    /// Storage that fails every read and write
    pub fn broken() -> Self {
        let storage = Self::default();
        storage.broken.set(true);
        storage
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for FakeStorage {
    fn get(&self, key: &str) -> Option<String> {
        if self.broken.get() {
            return None;
        }
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        if self.broken.get() {
            return Err(WidgetError::Storage("SecurityError: storage disabled".into()));
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct FakeRow {
    text: String,
    visible: Cell<bool>,
}

impl FakeRow {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            visible: Cell::new(true),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl FilterRow for FakeRow {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}
