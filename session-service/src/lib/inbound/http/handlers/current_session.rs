use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn current_session(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CurrentSessionData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentSessionData {
            user_id: user.user_id.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSessionData {
    pub user_id: String,
}
