use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use super::traits::BaseMailer;

/// Mailer backed by a JSON mail API.
///
/// Sends are best-effort: callers that must not fail on a send error are
/// expected to spawn the send and log the outcome.
pub struct ApiMailer {
    client: Client,
    api_key: String,
    from: String,
}

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl ApiMailer {
    const SEND_URL: &'static str = "https://api.resend.com/emails";

    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl BaseMailer for ApiMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = MailMessage {
            from: &self.from,
            to,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(Self::SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("Mail API returned {}: {}", status, detail));
        }

        info!(to = %to, subject = %subject, "Notification email sent");
        Ok(())
    }
}

/// Mailer used when no mail credentials are configured (and in tests).
/// Accepts every send and does nothing.
pub struct NoopMailer;

#[async_trait]
impl BaseMailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
        tracing::debug!(to = %to, subject = %subject, "Mailer not configured, skipping send");
        Ok(())
    }
}
