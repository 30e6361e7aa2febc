//! Contact form validation and the submission log.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use cooling_store::{keys, Slot, Store};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engagement::newsletter::{is_valid_email, NewsletterList};
use crate::error::CommerceError;

/// Shortest accepted message, in characters.
pub const MESSAGE_MIN_CHARS: usize = 10;
/// Longest accepted message, in characters.
pub const MESSAGE_MAX_CHARS: usize = 1000;

fn phone_pattern() -> Option<&'static Regex> {
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    PHONE
        .get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").ok())
        .as_ref()
}

/// A validation failure for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl From<FieldError> for CommerceError {
    fn from(e: FieldError) -> Self {
        CommerceError::InvalidField {
            field: e.field,
            message: e.message,
        }
    }
}

/// The contact page form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    /// Product the enquiry is about, if any.
    #[serde(default)]
    pub product: Option<String>,
    pub message: String,
    /// Also subscribe the email to the newsletter.
    #[serde(default)]
    pub newsletter: bool,
}

impl ContactForm {
    /// Every field that fails validation, in form order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        } else if name.chars().count() < 2 {
            errors.push(FieldError::new("name", "Name must be at least 2 characters"));
        } else if !name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
            errors.push(FieldError::new(
                "name",
                "Name can only contain letters and spaces",
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(email) {
            errors.push(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }

        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            let digits: String = phone
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(*c, '-' | '(' | ')'))
                .collect();
            if !phone_pattern().is_some_and(|re| re.is_match(&digits)) {
                errors.push(FieldError::new("phone", "Please enter a valid phone number"));
            }
        }

        if self.subject.is_empty() {
            errors.push(FieldError::new("subject", "Please select a subject"));
        }

        let message_chars = self.message.trim().chars().count();
        if message_chars == 0 {
            errors.push(FieldError::new("message", "Message is required"));
        } else if message_chars < MESSAGE_MIN_CHARS {
            errors.push(FieldError::new(
                "message",
                "Message must be at least 10 characters",
            ));
        } else if message_chars > MESSAGE_MAX_CHARS {
            errors.push(FieldError::new(
                "message",
                "Message must be less than 1000 characters",
            ));
        }

        errors
    }

    /// Fail with the first invalid field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        match self.field_errors().into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub product: Option<String>,
    pub message: String,
    pub newsletter: bool,
    pub timestamp: DateTime<Utc>,
}

impl ContactSubmission {
    /// Stamp a validated form with the submission time.
    pub fn from_form(form: ContactForm, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.filter(|p| !p.trim().is_empty()),
            subject: form.subject,
            product: form.product.filter(|p| !p.is_empty()),
            message: form.message.trim().to_string(),
            newsletter: form.newsletter,
            timestamp,
        }
    }
}

/// Append-only log of contact submissions.
#[derive(Debug)]
pub struct ContactLog<S: Store> {
    slot: Slot<S, Vec<ContactSubmission>>,
    newsletter: NewsletterList<S>,
}

impl<S: Store + Clone> ContactLog<S> {
    pub fn new(store: S) -> Self {
        Self {
            slot: Slot::new(store.clone(), keys::CONTACT_SUBMISSIONS),
            newsletter: NewsletterList::new(store),
        }
    }
}

impl<S: Store> ContactLog<S> {
    /// Validate and store a form, subscribing the sender to the newsletter
    /// when asked.
    pub fn submit(&self, form: ContactForm) -> Result<ContactSubmission, CommerceError> {
        form.validate()?;
        let submission = ContactSubmission::from_form(form, Utc::now());

        self.slot.update(|log| log.push(submission.clone()))?;
        if submission.newsletter {
            self.newsletter.subscribe(&submission.email)?;
        }
        info!(subject = %submission.subject, "contact form submitted");
        Ok(submission)
    }

    /// All stored submissions, oldest first.
    pub fn submissions(&self) -> Vec<ContactSubmission> {
        self.slot.load_or_default()
    }
}
