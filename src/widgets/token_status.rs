//! Token Status Panel
//!
//! Shows how long the current QR token stays valid and how many people
//! registered today. Fed by the token poller; counts down once per second.

use std::time::Duration;

use leptos::prelude::*;

use crate::models::TokenResponse;

const PLACEHOLDER: &str = "--";

/// `mm:ss`, or a placeholder when the server did not report a ttl
pub fn format_remaining(secs: Option<u32>) -> String {
    match secs {
        Some(secs) => format!("{:02}:{:02}", secs / 60, secs % 60),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_count(count: Option<u32>) -> String {
    count.map(|c| c.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// One second of countdown, stopping at zero
pub fn countdown_step(secs: Option<u32>) -> Option<u32> {
    secs.map(|s| s.saturating_sub(1))
}

#[component]
pub fn TokenStatusPanel(status: ReadSignal<Option<TokenResponse>>) -> impl IntoView {
    let (remaining, set_remaining) = signal(None::<u32>);

    // Every rendered token restarts the countdown
    Effect::new(move |_| {
        set_remaining.set(status.get().and_then(|s| s.ttl));
    });

    match set_interval_with_handle(
        move || set_remaining.update(|secs| *secs = countdown_step(*secs)),
        Duration::from_secs(1),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::warn!(target: "token_status", "countdown disabled: {:?}", e),
    }

    view! {
        <div class="token-status">
            <span class="token-ttl">
                "Validade do QR: " {move || format_remaining(remaining.get())}
            </span>
            <span class="token-contador">
                "Presenças hoje: " {move || format_count(status.get().and_then(|s| s.contador))}
            </span>
        </div>
    }
}
