use aws_sdk_sesv2::Client as SesClient;

use crate::{
    config::EmailConfig,
    error::{AppError, Result},
    models::ContactPayload,
};

/// Notify the site owner about a contact submission. The visitor's address
/// goes into reply-to so the owner can answer directly; SES requires the
/// actual sender to be the verified identity from config.
pub async fn send_contact_email(
    ses_client: &SesClient,
    config: &EmailConfig,
    contact: &ContactPayload,
) -> Result<()> {
    let subject_line = contact
        .subject
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("New contact request");

    let destination = aws_sdk_sesv2::types::Destination::builder()
        .to_addresses(&config.contact_recipient)
        .build();

    let subject = aws_sdk_sesv2::types::Content::builder()
        .data(subject_line)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::EmailError(format!("Failed to build subject: {}", e)))?;

    let html_body = aws_sdk_sesv2::types::Content::builder()
        .data(contact_email_html(contact))
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::EmailError(format!("Failed to build body: {}", e)))?;

    let body = aws_sdk_sesv2::types::Body::builder()
        .html(html_body)
        .build();

    let message = aws_sdk_sesv2::types::Message::builder()
        .subject(subject)
        .body(body)
        .build();

    let content = aws_sdk_sesv2::types::EmailContent::builder()
        .simple(message)
        .build();

    ses_client
        .send_email()
        .from_email_address(&config.sender_address)
        .reply_to_addresses(&contact.email)
        .destination(destination)
        .content(content)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Failed to send contact email: {:?}", e);
            AppError::EmailError("Failed to send contact notification".to_string())
        })?;

    Ok(())
}

pub fn contact_email_html(contact: &ContactPayload) -> String {
    let row = |label: &str, value: &str| {
        format!("<p><strong>{}:</strong> {}</p>", label, escape_html(value))
    };

    let mut html = String::from("<h3>New Contact Request</h3>");
    html.push_str(&row("Name", &contact.name));
    html.push_str(&row("Email", &contact.email));

    if let Some(phone) = contact.phone.as_deref() {
        html.push_str(&row("Phone", phone));
    }
    if let Some(company) = contact.company.as_deref() {
        html.push_str(&row("Company", company));
    }
    if let Some(subject) = contact.subject.as_deref() {
        html.push_str(&row("Subject", subject));
    }

    html.push_str(&format!(
        "<p><strong>Message:</strong><br>{}</p>",
        escape_html(&contact.message)
    ));

    html
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactPayload {
        ContactPayload {
            name: "Nino".to_string(),
            company: Some("Granite Ltd".to_string()),
            email: "nino@example.com".to_string(),
            phone: Some("+995 555 123456".to_string()),
            subject: Some("Tiles order".to_string()),
            message: "Do you ship <large> slabs?".to_string(),
        }
    }

    #[test]
    fn html_contains_all_submitted_fields() {
        let html = contact_email_html(&contact());

        assert!(html.contains("Nino"));
        assert!(html.contains("nino@example.com"));
        assert!(html.contains("+995 555 123456"));
        assert!(html.contains("Granite Ltd"));
        assert!(html.contains("Tiles order"));
    }

    #[test]
    fn html_escapes_markup_in_user_input() {
        let html = contact_email_html(&contact());

        assert!(html.contains("&lt;large&gt;"));
        assert!(!html.contains("<large>"));
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let mut c = contact();
        c.company = None;
        c.phone = None;
        c.subject = None;

        let html = contact_email_html(&c);
        assert!(!html.contains("Company"));
        assert!(!html.contains("Phone"));
        assert!(!html.contains("Subject"));
    }
}
