//! Contact form: relays the submission to the operator inbox and sends an
//! acknowledgement to the sender.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub inquiry_type: String,
    pub industry: String,
    pub contact_method: String,
    pub message: String,
}

impl ContactRequest {
    fn validate(&self) -> Result<(), AppError> {
        let fields = [
            &self.name,
            &self.email,
            &self.subject,
            &self.inquiry_type,
            &self.industry,
            &self.contact_method,
            &self.message,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation("All fields are required".to_string()));
        }
        Ok(())
    }
}

/// POST /api/v1/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    request.validate()?;

    let relay = format!(
        "New contact form submission from Ascent:\n\n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\
         Inquiry Type: {}\n\
         Industry: {}\n\
         Preferred Contact Method: {}\n\n\
         Message:\n{}\n",
        request.name,
        request.email,
        request.subject,
        request.inquiry_type,
        request.industry,
        request.contact_method,
        request.message
    );
    state
        .mailer
        .send(
            &state.config.contact_inbox,
            &format!("New Contact Form Submission: {}", request.subject),
            &relay,
        )
        .await?;

    let acknowledgement = format!(
        "Hi {},\n\n\
         Thank you for reaching out to Ascent! We've received your message and will get back to you soon.\n\n\
         Your message:\n\"{}\"\n\n\
         We'll respond within 24-48 hours.\n\n\
         Best regards,\n\
         The Ascent Team\n\n\
         ---\n\
         This is an automated response. Please don't reply to this email.",
        request.name, request.message
    );
    state
        .mailer
        .send(&request.email, "Thank you for contacting Ascent", &acknowledgement)
        .await?;

    Ok(Json(serde_json::json!({"success": true})))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Question".to_string(),
            inquiry_type: "support".to_string(),
            industry: "fintech".to_string(),
            contact_method: "email".to_string(),
            message: "Hello there.".to_string(),
        }
    }

    #[test]
    fn test_complete_request_validates() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_any_blank_field_is_rejected() {
        let mut r = request();
        r.message = "   ".to_string();
        assert!(r.validate().is_err());
    }
}
