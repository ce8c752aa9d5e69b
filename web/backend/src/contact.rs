use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InquiryError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is invalid")]
    InvalidEmail,
    #[error("contact form forwarding is not configured")]
    NotConfigured,
    #[error("form endpoint unreachable: {0}")]
    Transport(String),
    #[error("form endpoint rejected the inquiry: {0}")]
    Rejected(String),
}

impl InquiryError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, InquiryError::MissingField(_) | InquiryError::InvalidEmail)
    }
}

/// Contact form as submitted by a visitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_type: Option<String>,
}

impl InquiryForm {
    pub fn validate(&self) -> Result<(), InquiryError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(InquiryError::MissingField(field));
            }
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(InquiryError::InvalidEmail),
        }
    }

    /// Trimmed copy; blank optional fields are dropped.
    pub fn normalized(&self) -> Self {
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
            phone: optional(&self.phone),
            company: optional(&self.company),
            inquiry_type: optional(&self.inquiry_type),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FormEnvelope {
    result: String,
    #[serde(default)]
    error: Option<String>,
}

/// Posts inquiries to the spreadsheet-backed form endpoint.
pub struct ContactForwarder {
    client: Client,
    endpoint: String,
}

impl ContactForwarder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Returns a receipt id once the endpoint reports success.
    pub async fn forward(&self, form: &InquiryForm) -> Result<Uuid, InquiryError> {
        form.validate()?;
        let form = form.normalized();

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .timeout(FORWARD_TIMEOUT)
            .send()
            .await
            .map_err(|e| InquiryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InquiryError::Rejected(format!("HTTP {status}")));
        }

        let envelope: FormEnvelope = response
            .json()
            .await
            .map_err(|e| InquiryError::Rejected(format!("unreadable response: {e}")))?;

        if envelope.result != "success" {
            return Err(InquiryError::Rejected(
                envelope.error.unwrap_or(envelope.result),
            ));
        }

        let receipt = Uuid::new_v4();
        tracing::info!(%receipt, inquiry_type = ?form.inquiry_type, "inquiry forwarded");
        Ok(receipt)
    }
}
