use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::access::SessionClaims;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(contact_id): Path<i64>,
) -> Result<ApiSuccess<DeleteContactResponseData>, ApiError> {
    state
        .contact_service
        .delete_contact(&claims, ContactId(contact_id))
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteContactResponseData {
            message: "Contact deleted".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteContactResponseData {
    pub message: String,
}
