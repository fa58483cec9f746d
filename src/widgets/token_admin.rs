//! Token Invalidation
//!
//! Admin action that rotates the server token and shows the new QR code
//! right away instead of waiting for the next poll.

use crate::error::WidgetResult;
use crate::models::TokenResponse;
use crate::ports::{QrRenderer, TokenInvalidator, TokenSource};
use crate::widgets::TokenPoller;

/// Rotate the token and hand the new one to the poller
pub async fn invalidate_and_adopt<I, S, Q>(
    invalidator: &I,
    poller: &TokenPoller<S, Q>,
    password: &str,
) -> WidgetResult<TokenResponse>
where
    I: TokenInvalidator,
    S: TokenSource + 'static,
    Q: QrRenderer + 'static,
{
    let response = invalidator.invalidate(password).await?;
    log::info!(target: "token_admin", "token rotated");
    poller.adopt(&response)?;
    Ok(response)
}
