//! Frontend Models
//!
//! Data structures matching the server's JSON endpoints, plus the theme value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{WidgetError, WidgetResult};

/// `GET /api/token` and `POST /admin/invalidate_token` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Seconds of validity left
    pub ttl: Option<u32>,
    /// Attendance registered today
    pub contador: Option<u32>,
}

impl TokenResponse {
    pub fn from_json(body: &str) -> WidgetResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Category label -> count, in the order the server sent them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateCounts {
    pub entries: Vec<(String, f64)>,
}

#[derive(Deserialize)]
struct ChartsResponse {
    setores: serde_json::Map<String, Value>,
}

impl AggregateCounts {
    /// Parse a `GET /api/graficos` body
    pub fn from_json(body: &str) -> WidgetResult<Self> {
        let parsed: ChartsResponse = serde_json::from_str(body)?;
        let mut entries = Vec::with_capacity(parsed.setores.len());
        for (label, value) in parsed.setores {
            let count = value.as_f64().ok_or_else(|| {
                WidgetError::MalformedResponse(format!("count for {:?} is not a number: {}", label, value))
            })?;
            entries.push((label, count));
        }
        Ok(Self { entries })
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }
}

/// One `by_day` row; `Data` is `dd/mm/yyyy`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayCount {
    #[serde(rename = "Data")]
    pub day: String,
    pub count: f64,
}

/// One `by_month` row; `Month` is `yyyy-mm`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthCount {
    #[serde(rename = "Month")]
    pub month: String,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectorCount {
    #[serde(rename = "Setor")]
    pub sector: String,
    pub count: f64,
}

/// `GET /admin/data` body. An empty selection comes back without `contador`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AdminData {
    pub by_day: Vec<DayCount>,
    pub by_month: Vec<MonthCount>,
    /// Busiest sector first
    pub by_setor: Vec<SectorCount>,
    /// Raw attendance rows, column name -> cell
    pub records: Vec<serde_json::Map<String, Value>>,
    pub contador: Option<u32>,
}

impl AdminData {
    pub fn from_json(body: &str) -> WidgetResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn sector_counts(&self) -> AggregateCounts {
        AggregateCounts {
            entries: self
                .by_setor
                .iter()
                .map(|row| (row.sector.clone(), row.count))
                .collect(),
        }
    }
}

/// Visual mode stored under the theme key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored value; anything unrecognised is `Light`
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}
