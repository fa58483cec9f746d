use std::future::Future;

use gloo_timers::callback::Interval;

use crate::ports::Runtime;

/// Browser event loop: tasks via Leptos' `spawn_local`, timers via gloo
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    type Interval = Interval;

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        leptos::task::spawn_local(task);
    }

    fn every(&self, period_ms: u32, tick: impl FnMut() + 'static) -> Interval {
        Interval::new(period_ms, tick)
    }
}
