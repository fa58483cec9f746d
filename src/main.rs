#![allow(warnings)]
//! Presença Frontend Entry Point
//!
//! Attendance QR code, theme toggle, table filter and sector chart for the
//! server-rendered pages.

mod app;
mod browser;
mod commands;
mod config;
mod error;
mod models;
mod ports;
mod widgets;

#[cfg(test)]
mod testing;

fn main() {
    console_error_panic_hook::set_once();
    console_logger::init(log::LevelFilter::Info);
    app::run_when_ready();
}
