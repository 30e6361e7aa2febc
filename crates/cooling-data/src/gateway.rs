//! Submission gateway for the contact and newsletter forms.

use std::time::Duration;

use async_trait::async_trait;
use cooling_commerce::engagement::{ContactForm, ContactLog, ContactSubmission, NewsletterList};
use cooling_store::Store;
use tracing::debug;

use crate::error::DataResult;

/// Receives form submissions.
///
/// The storefront has no backend; [`LocalGateway`] records submissions in
/// the key/value store after an optional simulated round trip.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Validate and record a contact form.
    async fn submit_contact(&self, form: ContactForm) -> DataResult<ContactSubmission>;

    /// Add an address to the newsletter. Returns `false` when it was
    /// already subscribed.
    async fn subscribe_newsletter(&self, email: &str) -> DataResult<bool>;
}

/// Gateway that writes submissions to a local [`Store`].
#[derive(Debug)]
pub struct LocalGateway<S: Store> {
    contacts: ContactLog<S>,
    newsletter: NewsletterList<S>,
    latency: Duration,
}

impl<S: Store + Clone> LocalGateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            contacts: ContactLog::new(store.clone()),
            newsletter: NewsletterList::new(store),
            latency: Duration::ZERO,
        }
    }
}

impl<S: Store> LocalGateway<S> {
    /// Delay every submission by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            debug!(latency = ?self.latency, "simulating submission round trip");
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl<S> SubmissionGateway for LocalGateway<S>
where
    S: Store + Send + Sync,
{
    async fn submit_contact(&self, form: ContactForm) -> DataResult<ContactSubmission> {
        self.round_trip().await;
        Ok(self.contacts.submit(form)?)
    }

    async fn subscribe_newsletter(&self, email: &str) -> DataResult<bool> {
        self.round_trip().await;
        Ok(self.newsletter.subscribe(email)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use cooling_commerce::CommerceError;
    use cooling_store::MemoryStore;
    use tokio::time::Instant;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sara Khan".to_string(),
            email: "sara@example.com".to_string(),
            subject: "quote".to_string(),
            message: "Need two split units for a flat.".to_string(),
            newsletter: true,
            ..ContactForm::default()
        }
    }

    #[tokio::test]
    async fn test_contact_recorded_and_subscribed() {
        let store = MemoryStore::new();
        let gateway = LocalGateway::new(store.clone());

        let submission = gateway.submit_contact(form()).await.unwrap();
        assert_eq!(submission.email, "sara@example.com");

        assert_eq!(ContactLog::new(store.clone()).submissions().len(), 1);
        assert!(NewsletterList::new(store).contains("sara@example.com"));
    }

    #[tokio::test]
    async fn test_subscribe_twice() {
        let gateway = LocalGateway::new(MemoryStore::new());
        assert!(gateway.subscribe_newsletter("a@b.co").await.unwrap());
        assert!(!gateway.subscribe_newsletter("a@b.co").await.unwrap());
        assert!(matches!(
            gateway.subscribe_newsletter("not-an-email").await,
            Err(DataError::Commerce(CommerceError::InvalidEmail(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let gateway =
            LocalGateway::new(MemoryStore::new()).with_latency(Duration::from_millis(1500));

        let started = Instant::now();
        gateway.subscribe_newsletter("a@b.co").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_works_behind_trait_object() {
        let gateway: Box<dyn SubmissionGateway> = Box::new(LocalGateway::new(MemoryStore::new()));
        let mut invalid = form();
        invalid.message = "short".to_string();
        assert!(gateway.submit_contact(invalid).await.is_err());
    }
}
