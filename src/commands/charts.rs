//! Chart Endpoint
//!
//! `GET /api/graficos`, attendance counts per sector.

use super::get_json_text;
use crate::error::WidgetResult;
use crate::models::AggregateCounts;
use crate::ports::CountsSource;

pub struct HttpCountsSource {
    endpoint: String,
}

impl HttpCountsSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl CountsSource for HttpCountsSource {
    async fn fetch_counts(&self) -> WidgetResult<AggregateCounts> {
        let body = get_json_text(&self.endpoint).await?;
        AggregateCounts::from_json(&body)
    }
}
