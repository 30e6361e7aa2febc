//! Visitor engagement records.
//!
//! Each record lives in its own storage slot: user ratings, newsletter
//! subscribers, contact submissions and the visitor count.

mod contact;
mod newsletter;
mod ratings;
mod visitors;

pub use contact::{
    ContactForm, ContactLog, ContactSubmission, FieldError, MESSAGE_MAX_CHARS, MESSAGE_MIN_CHARS,
};
pub use newsletter::{is_valid_email, NewsletterList};
pub use ratings::UserRatings;
pub use visitors::{VisitorCounter, INITIAL_VISITOR_COUNT};
