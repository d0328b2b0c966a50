//! Contact page: business details and message relay.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::{
    dto::contact_dto::{ContactForm, ContactRequest},
    services::RentalResult,
};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct MailError(pub String);

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait ContactMailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl ContactMailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            "contact message:\n{}",
            mail.body
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BusinessHours {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
}

/// Contact details rendered on the contact page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub business_hours: BusinessHours,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "+94 77 123 4567".into(),
            email: "info@gorydz.com".into(),
            address: "123 Main Street, Negombo, Sri Lanka".into(),
            business_hours: BusinessHours {
                weekdays: "8:00-22:00".into(),
                saturday: "8:00-22:00".into(),
                sunday: "8:00-22:00".into(),
            },
        }
    }
}

#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn ContactMailer>,
    from_email: String,
    contact_email: String,
    info: ContactInfo,
}

impl ContactService {
    pub fn new(
        mailer: Arc<dyn ContactMailer>,
        from_email: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            from_email: from_email.into(),
            contact_email: contact_email.into(),
            info: ContactInfo::default(),
        }
    }

    pub fn info(&self) -> &ContactInfo {
        &self.info
    }

    /// Validate the form and hand the message to the mailer.
    pub async fn submit(&self, form: &ContactForm) -> RentalResult<()> {
        let request = ContactRequest::parse(form)?;
        let mail = OutgoingMail {
            from: self.from_email.clone(),
            to: self.contact_email.clone(),
            subject: format!("Contact Form: {}", request.subject),
            body: request.body(),
        };
        self.mailer.send(&mail).await?;
        Ok(())
    }
}
