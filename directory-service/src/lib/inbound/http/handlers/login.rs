use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .user_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            // One message for unknown email and wrong password alike
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            _ => ApiError::from(e),
        })
        .map(|ref authenticated| ApiSuccess::new(StatusCode::OK, authenticated.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl From<&AuthenticatedUser> for LoginResponseData {
    fn from(authenticated: &AuthenticatedUser) -> Self {
        Self {
            first_name: authenticated.user.first_name.clone(),
            last_name: authenticated.user.last_name.clone(),
            email: authenticated.user.email.as_str().to_string(),
            role: authenticated.user.role.to_string(),
            token: authenticated.token.clone(),
        }
    }
}
