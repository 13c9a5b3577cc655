use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Contact, ContactPayload},
};

pub async fn create(pool: &PgPool, payload: &ContactPayload) -> Result<Contact> {
    let contact = sqlx::query_as::<_, Contact>(
        "INSERT INTO contacts (name, company, email, phone, subject, message)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(&payload.name)
    .bind(&payload.company)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.subject)
    .bind(&payload.message)
    .fetch_one(pool)
    .await?;

    Ok(contact)
}
