//! Page Widgets
//!
//! Independent widgets wired to the server-rendered pages.

mod chart;
mod table_filter;
mod theme;
mod token_admin;
mod token_poller;
mod token_status;

pub use chart::{ChartConfig, ChartData, ChartWidget, Dataset};
pub use table_filter::{apply_filter, row_matches};
pub use theme::ThemeController;
pub use token_admin::invalidate_and_adopt;
pub use token_poller::{qr_text, PollHandle, TokenPoller};
pub use token_status::TokenStatusPanel;
