//! Outbound mail via the Resend HTTP API.
//!
//! Plain-text transactional mail only: welcome emails, registration
//! notifications, contact-form relay and acknowledgement.

use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_key: String,
    from: String,
}

impl Mailer {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }

    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from: &self.from,
                to: [to],
                subject,
                text,
            })
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Resend request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Failed to send email to {to}: {status} {body}");
            return Err(AppError::Mail(format!(
                "Resend returned {status} for mail to {to}"
            )));
        }

        info!("Email sent to {to}: {subject}");
        Ok(())
    }
}
