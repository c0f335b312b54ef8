use std::fmt;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::user::errors::EmailError;

use super::errors::PhoneError;

/// Contact aggregate entity.
///
/// An address-book entry owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub owner_id: UserId,
}

/// Contact unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// Exactly ten ASCII digits, no separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const LENGTH: usize = 10;

    /// Create a new validated phone number.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not exactly ten digits
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        if phone.len() == Self::LENGTH && phone.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(phone))
        } else {
            Err(PhoneError::InvalidFormat(phone))
        }
    }

    /// Get phone number as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// New contact record to persist; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub owner_id: UserId,
}

/// Command to create a contact with validated fields.
///
/// Ownership is not part of the command; the service binds the contact to
/// the authenticated caller.
#[derive(Debug)]
pub struct CreateContactCommand {
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}

impl CreateContactCommand {
    pub fn new(name: String, email: EmailAddress, phone: PhoneNumber) -> Self {
        Self { name, email, phone }
    }
}

/// Command to replace a contact's fields.
#[derive(Debug)]
pub struct UpdateContactCommand {
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}

impl UpdateContactCommand {
    pub fn new(name: String, email: EmailAddress, phone: PhoneNumber) -> Self {
        Self { name, email, phone }
    }
}

/// Parse errors for contact value objects, used by the inbound layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContactFieldError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneError),
}
