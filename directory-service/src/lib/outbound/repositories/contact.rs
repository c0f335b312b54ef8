use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::PhoneNumber;
use crate::domain::contact::ports::ContactRepository;
use crate::contact::errors::ContactError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    owner_id: i64,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(Contact {
            id: ContactId(row.id),
            name: row.name,
            email: EmailAddress::new(row.email)?,
            phone: PhoneNumber::new(row.phone)?,
            owner_id: UserId(row.owner_id),
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn insert(&self, contact: NewContact) -> Result<Contact, ContactError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (name, email, phone, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, owner_id
            "#,
        )
        .bind(&contact.name)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .bind(contact.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, email, phone, owner_id
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        row.map(Contact::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ContactError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, email, phone, owner_id
            FROM contacts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn update(&self, contact: &Contact) -> Result<(), ContactError> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET name = $2, email = $3, phone = $4
            WHERE id = $1
            "#,
        )
        .bind(contact.id.0)
        .bind(&contact.name)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(contact.id.0));
        }

        Ok(())
    }

    async fn delete(&self, id: ContactId) -> Result<(), ContactError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(id.0));
        }

        Ok(())
    }
}
