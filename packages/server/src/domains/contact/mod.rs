//! Contact domain - public inquiry form delivered by email
//!
//! Rate limited per client address; a honeypot field silently drops bots.

pub mod actions;
pub mod email;
pub mod models;

pub use actions::{check_rate_limit, mailer, submit_contact, ContactOutcome};
pub use models::{ContactInput, ContactSubmission, Service};
