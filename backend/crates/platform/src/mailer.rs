//! Transactional Email Delivery
//!
//! The [`MailSender`] trait is the seam consumed by the identity flows;
//! [`ResendMailer`] delivers through the Resend HTTP API.

use serde::Serialize;
use thiserror::Error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

/// Sends templated transactional email.
#[trait_variant::make(MailSender: Send)]
pub trait LocalMailSender {
    /// Deliver the email-verification link.
    async fn send_email_verification(&self, to: &str, token: &str) -> Result<(), MailerError>;

    /// Deliver the password-reset link.
    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), MailerError>;
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Resend-backed mailer.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    frontend_url: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String, frontend_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
            frontend_url,
        }
    }

    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailerError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, subject, "Email delivery rejected");
            return Err(MailerError::Delivery(format!(
                "provider returned {}",
                status
            )));
        }

        tracing::info!(subject, "Email delivered");
        Ok(())
    }

    fn link_template(&self, heading: &str, body: &str, link: &str, cta: &str) -> String {
        format!(
            r#"<div style="font-family:sans-serif;max-width:600px;margin:0 auto">
  <h1>{heading}</h1>
  <p>{body}</p>
  <p><a href="{link}" style="display:inline-block;padding:12px 24px;background:#d4a650;color:#0a0a0f;text-decoration:none;border-radius:8px">{cta}</a></p>
  <p style="color:#6b6b7b;font-size:12px">If you didn't request this, please ignore this email.</p>
</div>"#
        )
    }
}

impl MailSender for ResendMailer {
    async fn send_email_verification(&self, to: &str, token: &str) -> Result<(), MailerError> {
        let link = format!("{}/verify-email?token={}", self.frontend_url, token);
        let html = self.link_template(
            "Verify Your Email",
            "Click the button below to verify your email address. The link expires in 24 hours.",
            &link,
            "Verify Email",
        );
        self.send(to, "Verify your email address", html).await
    }

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), MailerError> {
        let link = format!("{}/reset-password?token={}", self.frontend_url, token);
        let html = self.link_template(
            "Reset Your Password",
            "Click the button below to choose a new password. The link expires in 1 hour.",
            &link,
            "Reset Password",
        );
        self.send(to, "Reset your password", html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_template_embeds_link() {
        let mailer = ResendMailer::new(
            "key".to_string(),
            "noreply@example.com".to_string(),
            "http://localhost:3001".to_string(),
        );
        let html = mailer.link_template("Heading", "Body", "http://localhost:3001/x?token=abc", "Go");
        assert!(html.contains("http://localhost:3001/x?token=abc"));
        assert!(html.contains("Heading"));
    }
}
