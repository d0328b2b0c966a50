use serde::Deserialize;

use crate::validation::{ValidationErrors, Violation, looks_like_email, required};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// A contact-form message with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn parse(form: &ContactForm) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &form.name);
        let email = required(&mut errors, "email", &form.email);
        if !email.is_empty() && !looks_like_email(&email) {
            errors.push(Violation::InvalidEmail("email"));
        }
        let subject = required(&mut errors, "subject", &form.subject);
        let message = required(&mut errors, "message", &form.message);
        errors.finish(Self {
            name,
            email,
            subject,
            message,
        })
    }

    /// Plain-text body relayed to the site operator.
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
            self.name, self.email, self.subject, self.message
        )
    }
}
