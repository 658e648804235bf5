use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates access tokens and adds user info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract token from Authorization header
    let token = auth::bearer_token(req.headers()).map_err(|e| {
        tracing::warn!(error = %e, "Authorization header rejected");
        ApiError::from(e)
    })?;

    let user_id = state.session_service.authenticate(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token validation failed");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
