use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Revoke the refresh token in the `Authorization` header.
///
/// Answers 204 whether or not the token was known.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::bearer_token(&headers)?;

    state.session_service.revoke(refresh_token).await?;

    tracing::info!("Refresh token revoked");

    Ok(StatusCode::NO_CONTENT)
}
