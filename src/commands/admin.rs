//! Admin Dashboard Endpoint
//!
//! `GET /admin/data?senha=..&nome=..&date_from=..&date_to=..`, the filtered
//! attendance aggregations behind the admin page.

use super::{form_body, get_json_text};
use crate::error::WidgetResult;
use crate::models::{AdminData, AggregateCounts};
use crate::ports::CountsSource;

/// Admin form state. Blank fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminFilter {
    pub password: String,
    /// Case-insensitive name fragment
    pub name: String,
    /// `yyyy-mm-dd`, inclusive
    pub date_from: String,
    pub date_to: String,
}

impl AdminFilter {
    pub fn query(&self) -> String {
        let mut pairs = vec![("senha", self.password.as_str())];
        for (key, value) in [
            ("nome", self.name.trim()),
            ("date_from", self.date_from.trim()),
            ("date_to", self.date_to.trim()),
        ] {
            if !value.is_empty() {
                pairs.push((key, value));
            }
        }
        form_body(&pairs)
    }
}

pub fn admin_data_url(endpoint: &str, filter: &AdminFilter) -> String {
    format!("{}?{}", endpoint, filter.query())
}

/// Reads the filter at fetch time, so a reload picks up edited inputs
pub struct HttpAdminCounts<F> {
    endpoint: String,
    filter: F,
}

impl<F: Fn() -> AdminFilter> HttpAdminCounts<F> {
    pub fn new(endpoint: impl Into<String>, filter: F) -> Self {
        Self {
            endpoint: endpoint.into(),
            filter,
        }
    }

    pub async fn fetch_admin_data(&self) -> WidgetResult<AdminData> {
        let url = admin_data_url(&self.endpoint, &(self.filter)());
        let body = get_json_text(&url).await?;
        AdminData::from_json(&body)
    }
}

impl<F: Fn() -> AdminFilter> CountsSource for HttpAdminCounts<F> {
    async fn fetch_counts(&self) -> WidgetResult<AggregateCounts> {
        let data = self.fetch_admin_data().await?;
        log::debug!(
            target: "admin_chart",
            "{} records, {} today",
            data.records.len(),
            data.contador.unwrap_or(0)
        );
        Ok(data.sector_counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_skips_blank_fields() {
        let filter = AdminFilter {
            password: "C0rd1".into(),
            name: "  ".into(),
            ..Default::default()
        };
        assert_eq!(filter.query(), "senha=C0rd1");
    }

    #[test]
    fn test_query_carries_every_filter() {
        let filter = AdminFilter {
            password: "s3nha".into(),
            name: " Ana Maria ".into(),
            date_from: "2025-03-01".into(),
            date_to: "2025-03-31".into(),
        };
        assert_eq!(
            admin_data_url("/admin/data", &filter),
            "/admin/data?senha=s3nha&nome=Ana%20Maria&date_from=2025-03-01&date_to=2025-03-31"
        );
    }

    #[test]
    fn test_password_always_sent() {
        assert_eq!(AdminFilter::default().query(), "senha=");
    }
}
