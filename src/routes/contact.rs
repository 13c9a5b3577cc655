use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Contact, ContactPayload},
    queries::contact_queries,
    services::email_service,
};

/// The contact row is committed before the notification email is attempted,
/// so the record survives a relay outage; a failed send still reports a
/// server error to the caller.
pub async fn insert(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<Contact>)> {
    validate(&payload)?;

    let contact = contact_queries::create(&state.db, &payload).await?;

    email_service::send_contact_email(&state.ses_client, &state.email, &payload).await?;

    tracing::info!("Contact request {} saved and relayed", contact.id);

    Ok((StatusCode::CREATED, Json(contact)))
}

fn validate(payload: &ContactPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    Ok(())
}
