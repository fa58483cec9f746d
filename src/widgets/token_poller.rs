//! Token Poller
//!
//! Fetches a short-lived token and renders a QR code pointing at the
//! attendance page, immediately and then on a fixed interval.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::WidgetConfig;
use crate::error::WidgetResult;
use crate::models::TokenResponse;
use crate::ports::{QrRenderer, Runtime, TokenSource};

/// Build `<origin><path>?token=<token>`; the token goes in verbatim
pub fn qr_text(origin: &str, attendance_path: &str, token: &str) -> String {
    format!("{}{}?token={}", origin.trim_end_matches('/'), attendance_path, token)
}

type Observer = Box<dyn Fn(&TokenResponse)>;

pub struct TokenPoller<S, Q> {
    source: S,
    renderer: Q,
    origin: String,
    attendance_path: String,
    size: u32,
    period_ms: u32,
    /// Sequence number handed to the most recently started cycle
    latest: Cell<u64>,
    /// Sequence number of the response on screen; older ones are dropped
    rendered: Cell<u64>,
    stopped: Rc<Cell<bool>>,
    observers: RefCell<Vec<Observer>>,
}

impl<S: TokenSource + 'static, Q: QrRenderer + 'static> TokenPoller<S, Q> {
    pub fn new(source: S, renderer: Q, origin: impl Into<String>, config: &WidgetConfig) -> Self {
        Self {
            source,
            renderer,
            origin: origin.into(),
            attendance_path: config.attendance_path.clone(),
            size: config.qr_size,
            period_ms: config.poll_interval_ms,
            latest: Cell::new(0),
            rendered: Cell::new(0),
            stopped: Rc::new(Cell::new(false)),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Called with every response that gets rendered
    pub fn subscribe(&self, observer: impl Fn(&TokenResponse) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn qr_text_for(&self, token: &str) -> String {
        qr_text(&self.origin, &self.attendance_path, token)
    }

    /// Run one fetch + render cycle
    pub async fn refresh(&self) -> WidgetResult<()> {
        let seq = self.latest.get() + 1;
        self.latest.set(seq);

        let response = self.source.fetch_token().await?;

        if self.stopped.get() {
            log::debug!(target: "token_poller", "poller stopped, dropping response of cycle {}", seq);
            return Ok(());
        }
        if seq < self.rendered.get() {
            log::debug!(target: "token_poller", "cycle {} older than rendered {}, dropping response", seq, self.rendered.get());
            return Ok(());
        }
        self.show(seq, &response)
    }

    /// Render a token obtained elsewhere (e.g. after invalidation).
    /// Supersedes any cycle still in flight.
    pub fn adopt(&self, response: &TokenResponse) -> WidgetResult<()> {
        let seq = self.latest.get() + 1;
        self.latest.set(seq);
        self.show(seq, response)
    }

    fn show(&self, seq: u64, response: &TokenResponse) -> WidgetResult<()> {
        let text = self.qr_text_for(&response.token);
        self.renderer.render(&text, self.size)?;
        self.rendered.set(seq);
        log::debug!(target: "token_poller", "rendered QR for {}", text);
        for observer in self.observers.borrow().iter() {
            observer(response);
        }
        Ok(())
    }

    /// Refresh now and then every `poll_interval_ms` until the handle stops
    pub fn start<R: Runtime>(self: &Rc<Self>, runtime: &Rc<R>) -> PollHandle<R::Interval> {
        self.stopped.set(false);
        Self::spawn_cycle(self, &**runtime);

        let poller = Rc::clone(self);
        let rt = Rc::clone(runtime);
        let interval = runtime.every(self.period_ms, move || {
            Self::spawn_cycle(&poller, &*rt);
        });
        log::info!(target: "token_poller", "polling every {} ms", self.period_ms);

        PollHandle {
            interval: Some(interval),
            stopped: Rc::clone(&self.stopped),
        }
    }

    fn spawn_cycle<R: Runtime>(poller: &Rc<Self>, runtime: &R) {
        let poller = Rc::clone(poller);
        runtime.spawn(async move {
            // A failed cycle only skips this render; the interval keeps going
            if let Err(e) = poller.refresh().await {
                log::warn!(target: "token_poller", "skipping render: {}", e);
            }
        });
    }
}

/// Cancels polling when stopped or dropped
pub struct PollHandle<I> {
    interval: Option<I>,
    stopped: Rc<Cell<bool>>,
}

impl<I> PollHandle<I> {
    pub fn stop(self) {
        drop(self);
    }

    /// Keep polling for the lifetime of the page
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl<I> Drop for PollHandle<I> {
    fn drop(&mut self) {
        self.stopped.set(true);
        self.interval.take();
    }
}
