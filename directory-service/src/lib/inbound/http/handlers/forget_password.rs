use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn forget_password(
    State(state): State<AppState>,
    Json(body): Json<ForgetPasswordRequestBody>,
) -> Result<ApiSuccess<ForgetPasswordResponseData>, ApiError> {
    let sent = state
        .user_service
        .forget_password(&body.email)
        .await
        .map_err(ApiError::from)?;

    if !sent {
        return Err(ApiError::NotFound(
            "No account registered with that email".to_string(),
        ));
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ForgetPasswordResponseData {
            message: "Reset token sent".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgetPasswordRequestBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgetPasswordResponseData {
    pub message: String,
}
