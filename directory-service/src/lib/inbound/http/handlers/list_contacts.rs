use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContactData;
use crate::domain::access::SessionClaims;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<ApiSuccess<Vec<ContactData>>, ApiError> {
    state
        .contact_service
        .list_contacts(&claims)
        .await
        .map_err(ApiError::from)
        .map(|contacts| {
            ApiSuccess::new(
                StatusCode::OK,
                contacts.iter().map(ContactData::from).collect(),
            )
        })
}
