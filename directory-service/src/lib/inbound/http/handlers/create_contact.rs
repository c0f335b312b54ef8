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
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::PhoneNumber;
use crate::domain::contact::ports::ContactServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn create_contact(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(body): Json<CreateContactRequestBody>,
) -> Result<ApiSuccess<ContactData>, ApiError> {
    state
        .contact_service
        .create_contact(&claims, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::CREATED, contact.into()))
}

/// HTTP request body for creating a contact (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateContactRequestBody {
    name: String,
    email: String,
    phone: String,
}

impl CreateContactRequestBody {
    fn try_into_command(self) -> Result<CreateContactCommand, ContactFieldError> {
        let email = EmailAddress::new(self.email)?;
        let phone = PhoneNumber::new(self.phone)?;
        Ok(CreateContactCommand::new(self.name, email, phone))
    }
}

impl From<ContactFieldError> for ApiError {
    fn from(err: ContactFieldError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
