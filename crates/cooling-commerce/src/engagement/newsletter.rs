//! Newsletter subscriber list.

use std::sync::OnceLock;

use cooling_store::{keys, Slot, Store};
use regex::Regex;
use tracing::info;

use crate::error::CommerceError;

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Check an address has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}

/// Subscriber emails, stored as a JSON array without duplicates.
#[derive(Debug)]
pub struct NewsletterList<S: Store> {
    slot: Slot<S, Vec<String>>,
}

impl<S: Store> NewsletterList<S> {
    pub fn new(store: S) -> Self {
        Self {
            slot: Slot::new(store, keys::NEWSLETTER_SUBSCRIBERS),
        }
    }

    /// Add an address to the list.
    ///
    /// Returns `false` if it was already subscribed, in which case storage
    /// is left untouched.
    pub fn subscribe(&self, email: &str) -> Result<bool, CommerceError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(CommerceError::InvalidEmail(email.to_string()));
        }

        let mut subscribers = self.slot.load_or_default();
        if subscribers.iter().any(|s| s == email) {
            return Ok(false);
        }
        subscribers.push(email.to_string());
        self.slot.save(&subscribers)?;
        info!(subscribers = subscribers.len(), "newsletter subscription added");
        Ok(true)
    }

    pub fn subscribers(&self) -> Vec<String> {
        self.slot.load_or_default()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.subscribers().iter().any(|s| s == email.trim())
    }
}
