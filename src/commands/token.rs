//! Token Endpoints
//!
//! `GET /api/token` for polling and `POST /admin/invalidate_token` for rotation.

use super::{form_body, get_json_text, post_form_text};
use crate::error::WidgetResult;
use crate::models::TokenResponse;
use crate::ports::{TokenInvalidator, TokenSource};

pub struct HttpTokenSource {
    endpoint: String,
}

impl HttpTokenSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl TokenSource for HttpTokenSource {
    async fn fetch_token(&self) -> WidgetResult<TokenResponse> {
        let body = get_json_text(&self.endpoint).await?;
        TokenResponse::from_json(&body)
    }
}

pub struct HttpTokenInvalidator {
    endpoint: String,
}

impl HttpTokenInvalidator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl TokenInvalidator for HttpTokenInvalidator {
    async fn invalidate(&self, password: &str) -> WidgetResult<TokenResponse> {
        let body = post_form_text(&self.endpoint, form_body(&[("senha", password)])).await?;
        TokenResponse::from_json(&body)
    }
}
