//! Server API Wrappers
//!
//! HTTP bindings for the attendance server's JSON endpoints, organized
//! by endpoint.

mod admin;
mod charts;
mod token;

use gloo_net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{WidgetError, WidgetResult};

// Re-export all public items
pub use admin::*;
pub use charts::*;
pub use token::*;

/// application/x-www-form-urlencoded leaves these alone
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Encode `key=value&...` pairs, for form bodies and query strings
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_VALUE),
                utf8_percent_encode(value, FORM_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Body of a 2xx response
async fn body_text(response: Response) -> WidgetResult<String> {
    if !response.ok() {
        return Err(WidgetError::NetworkFailure(format!(
            "HTTP {} from {}",
            response.status(),
            response.url()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| WidgetError::MalformedResponse(e.to_string()))
}

async fn get_json_text(url: &str) -> WidgetResult<String> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await?;
    body_text(response).await
}

async fn post_form_text(url: &str, body: String) -> WidgetResult<String> {
    let response = Request::post(url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/json")
        .body(body)?
        .send()
        .await?;
    body_text(response).await
}
