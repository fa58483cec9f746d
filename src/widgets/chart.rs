//! Chart Renderer
//!
//! Fetches attendance counts per sector and draws them as a pie chart.
//! The admin page reruns the load whenever its filters change.

use serde::Serialize;

use crate::error::WidgetResult;
use crate::models::AggregateCounts;
use crate::ports::{ChartSurface, CountsSource};

/// Chart.js configuration object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub data: Vec<f64>,
}

impl ChartConfig {
    pub fn pie(counts: &AggregateCounts) -> Self {
        Self {
            kind: "pie",
            data: ChartData {
                labels: counts.labels(),
                datasets: vec![Dataset { data: counts.values() }],
            },
        }
    }
}

pub struct ChartWidget<S, C> {
    source: S,
    surface: C,
}

impl<S: CountsSource, C: ChartSurface> ChartWidget<S, C> {
    pub fn new(source: S, surface: C) -> Self {
        Self { source, surface }
    }

    pub async fn load(&self) -> WidgetResult<()> {
        let counts = self.source.fetch_counts().await?;
        log::info!(target: "chart", "loaded {} sectors", counts.entries.len());
        self.surface.render(&ChartConfig::pie(&counts))
    }

    /// On failure the canvas keeps whatever it showed before
    pub async fn run(&self) {
        if let Err(e) = self.load().await {
            log::error!(target: "chart", "chart left empty: {}", e);
        }
    }
}
