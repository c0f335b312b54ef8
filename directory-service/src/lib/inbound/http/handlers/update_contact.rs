use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ContactData;
use crate::domain::access::SessionClaims;
use crate::domain::contact::models::ContactFieldError;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::PhoneNumber;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::contact::ports::ContactServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn update_contact(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(contact_id): Path<i64>,
    Json(body): Json<UpdateContactRequestBody>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    state
        .contact_service
        .update_contact(&claims, ContactId(contact_id), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}

/// HTTP request body for replacing a contact's fields (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateContactRequestBody {
    name: String,
    email: String,
    phone: String,
}

impl UpdateContactRequestBody {
    fn try_into_command(self) -> Result<UpdateContactCommand, ContactFieldError> {
        let email = EmailAddress::new(self.email)?;
        let phone = PhoneNumber::new(self.phone)?;
        Ok(UpdateContactCommand::new(self.name, email, phone))
    }
}
