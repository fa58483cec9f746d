//! Page Boot
//!
//! Wires each widget to the server-rendered page. Widgets are independent:
//! a missing element or a failure in one never stops the others.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlElement, HtmlInputElement, HtmlTableSectionElement};

use crate::browser::{self, element_by_id, listen, BodyThemeSurface, BrowserRuntime, ChartCanvas, LocalStore, QrContainer};
use crate::commands::{AdminFilter, HttpAdminCounts, HttpCountsSource, HttpTokenInvalidator, HttpTokenSource};
use crate::config::WidgetConfig;
use crate::error::WidgetResult;
use crate::models::TokenResponse;
use crate::widgets::{apply_filter, invalidate_and_adopt, ChartWidget, ThemeController, TokenPoller, TokenStatusPanel};

type PagePoller = TokenPoller<HttpTokenSource, QrContainer>;

/// Outcome of one widget's initializer
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetStatus {
    Ready,
    /// Its element is not on this page
    Inactive,
    Failed(String),
}

type WidgetInit<'a> = (&'static str, Box<dyn FnOnce() -> WidgetResult<()> + 'a>);

fn widget<'a>(name: &'static str, init: impl FnOnce() -> WidgetResult<()> + 'a) -> WidgetInit<'a> {
    (name, Box::new(init))
}

/// Run every initializer in order, whatever the earlier ones returned
fn start_widgets(inits: Vec<WidgetInit<'_>>) -> Vec<(&'static str, WidgetStatus)> {
    inits
        .into_iter()
        .map(|(name, init)| (name, report(name, init())))
        .collect()
}

/// Boot now, or on `DOMContentLoaded` if the document is still parsing
pub fn run_when_ready() {
    let doc = match browser::document() {
        Ok(doc) => doc,
        Err(e) => {
            log::error!(target: "app", "cannot boot: {}", e);
            return;
        }
    };
    if doc.ready_state() == "loading" {
        if let Err(e) = listen(&doc, "DOMContentLoaded", |_| boot()) {
            log::error!(target: "app", "cannot wait for DOMContentLoaded: {}", e);
        }
    } else {
        boot();
    }
}

pub fn boot() {
    let config = browser::load_config();
    console_logger::init(console_logger::parse_level(&config.log_level));
    let runtime = Rc::new(BrowserRuntime);

    let statuses = start_widgets(vec![
        widget("token_poller", || init_token_widgets(&config, &runtime)),
        widget("theme", || init_theme(&config)),
        widget("table_filter", || init_table_filter(&config)),
        widget("chart", || init_chart(&config)),
        widget("admin_chart", || init_admin_chart(&config)),
    ]);
    let ready = statuses.iter().filter(|(_, status)| *status == WidgetStatus::Ready).count();
    log::debug!(target: "app", "{} of {} widgets active", ready, statuses.len());
}

fn report(widget: &'static str, result: WidgetResult<()>) -> WidgetStatus {
    match result {
        Ok(()) => {
            log::info!(target: widget, "ready");
            WidgetStatus::Ready
        }
        Err(e) if e.is_missing_element() => {
            log::debug!(target: widget, "inactive: {}", e);
            WidgetStatus::Inactive
        }
        Err(e) => {
            log::error!(target: widget, "failed to start: {}", e);
            WidgetStatus::Failed(e.to_string())
        }
    }
}

/// Current value of an `<input>`, empty when the page lacks it
fn input_value(id: &str) -> String {
    element_by_id::<HtmlInputElement>(id)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn init_token_widgets(config: &WidgetConfig, runtime: &Rc<BrowserRuntime>) -> WidgetResult<()> {
    let container: HtmlElement = element_by_id(&config.qr_element)?;
    let poller = Rc::new(TokenPoller::new(
        HttpTokenSource::new(&config.token_endpoint),
        QrContainer::new(container),
        browser::origin()?,
        config,
    ));

    if let Ok(panel) = element_by_id::<HtmlElement>(&config.status_element) {
        mount_status_panel(&poller, panel);
    }
    if let Ok(button) = element_by_id::<HtmlElement>(&config.invalidate_element) {
        report("token_admin", init_invalidate_button(config, &poller, &button));
    }

    // Runs until the page unloads
    poller.start(runtime).detach();
    Ok(())
}

fn mount_status_panel(poller: &PagePoller, panel: HtmlElement) {
    let (status, set_status) = signal(None::<TokenResponse>);
    poller.subscribe(move |resp| set_status.set(Some(resp.clone())));
    leptos::mount::mount_to(panel, move || view! { <TokenStatusPanel status=status /> }).forget();
}

fn init_invalidate_button(config: &WidgetConfig, poller: &Rc<PagePoller>, button: &HtmlElement) -> WidgetResult<()> {
    let poller = Rc::clone(poller);
    let invalidator = Rc::new(HttpTokenInvalidator::new(&config.invalidate_endpoint));
    let password_id = config.password_element.clone();

    listen(button, "click", move |ev| {
        ev.prevent_default();
        let password = input_value(&password_id);
        let poller = Rc::clone(&poller);
        let invalidator = Rc::clone(&invalidator);
        spawn_local(async move {
            if let Err(e) = invalidate_and_adopt(&*invalidator, &*poller, &password).await {
                log::warn!(target: "token_admin", "token not rotated: {}", e);
            }
        });
    })
}

fn init_theme(config: &WidgetConfig) -> WidgetResult<()> {
    let doc = browser::document()?;
    let toggle = element_by_id::<HtmlElement>(&config.theme_toggle_element).ok();
    let surface = BodyThemeSurface::new(doc.body(), &config.theme_attribute, toggle.clone());
    let controller = ThemeController::new(LocalStore, config);
    controller.apply_to(&surface);

    if let Some(toggle) = toggle {
        listen(&toggle, "click", move |_| {
            let theme = controller.toggle_and_apply(&surface);
            log::debug!(target: "theme", "switched to {}", theme.as_str());
        })?;
    }
    Ok(())
}

fn init_table_filter(config: &WidgetConfig) -> WidgetResult<()> {
    let input: HtmlInputElement = element_by_id(&config.search_element)?;
    let body: HtmlTableSectionElement = element_by_id(&config.table_body_element)?;
    let field = input.clone();
    listen(&input, "input", move |_| {
        apply_filter(&browser::table_rows(&body), &field.value());
    })
}

fn init_chart(config: &WidgetConfig) -> WidgetResult<()> {
    let canvas: HtmlCanvasElement = element_by_id(&config.chart_element)?;
    let widget = ChartWidget::new(HttpCountsSource::new(&config.charts_endpoint), ChartCanvas::new(canvas));
    spawn_local(async move { widget.run().await });
    Ok(())
}

fn admin_filter(config: &WidgetConfig) -> AdminFilter {
    AdminFilter {
        password: input_value(&config.password_element),
        name: input_value(&config.admin_name_element),
        date_from: input_value(&config.admin_from_element),
        date_to: input_value(&config.admin_to_element),
    }
}

fn init_admin_chart(config: &WidgetConfig) -> WidgetResult<()> {
    let canvas: HtmlCanvasElement = element_by_id(&config.admin_chart_element)?;
    let ids = config.clone();
    let source = HttpAdminCounts::new(&config.admin_data_endpoint, move || admin_filter(&ids));
    let widget = Rc::new(ChartWidget::new(source, ChartCanvas::new(canvas)));

    if let Ok(button) = element_by_id::<HtmlElement>(&config.admin_filter_element) {
        let widget = Rc::clone(&widget);
        listen(&button, "click", move |ev| {
            ev.prevent_default();
            let widget = Rc::clone(&widget);
            spawn_local(async move { widget.run().await });
        })?;
    }
    spawn_local(async move { widget.run().await });
    Ok(())
}
