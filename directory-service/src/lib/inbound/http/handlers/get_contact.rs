use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContactData;
use crate::domain::access::SessionClaims;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_contact(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(contact_id): Path<i64>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    state
        .contact_service
        .get_contact(&claims, ContactId(contact_id))
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}
