use serde::Deserialize;
use std::fmt;

use crate::common::validation::{is_blank, is_valid_email};
use crate::common::{ApiError, ApiResult};

pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Services offered on the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    WebDesign,
    WebDevelopment,
    GraphicDesign,
    WebHosting,
}

impl Service {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Web Design" => Some(Self::WebDesign),
            "Web Development" => Some(Self::WebDevelopment),
            "Graphic Design" => Some(Self::GraphicDesign),
            "Web Hosting" => Some(Self::WebHosting),
            _ => None,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::WebDesign => write!(f, "Web Design"),
            Service::WebDevelopment => write!(f, "Web Development"),
            Service::GraphicDesign => write!(f, "Graphic Design"),
            Service::WebHosting => write!(f, "Web Hosting"),
        }
    }
}

/// Raw contact form body
#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot: hidden from humans, filled in by bots
    #[serde(default)]
    pub website: Option<String>,
}

/// Validated contact submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub service: Service,
    pub message: String,
}

impl ContactInput {
    pub fn is_spam(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !is_blank(w))
    }

    /// Reports the first failing field
    pub fn validate(self) -> ApiResult<ContactSubmission> {
        if is_blank(&self.name) {
            return Err(invalid("Name is required"));
        }
        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(invalid("Invalid email address"));
        }
        let service = Service::parse(&self.service).ok_or_else(|| invalid("Invalid service"))?;
        if is_blank(&self.message) {
            return Err(invalid("Message is required"));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(invalid("Message must be at most 5000 characters"));
        }

        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email,
            service,
            message: self.message,
        })
    }
}

fn invalid(reason: &str) -> ApiError {
    ApiError::InvalidInput(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ContactInput {
        ContactInput {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            service: "Web Development".to_string(),
            message: "I need a website".to_string(),
            website: None,
        }
    }

    #[test]
    fn test_valid_submission() {
        let submission = input().validate().unwrap();
        assert_eq!(submission.service, Service::WebDevelopment);
        assert_eq!(submission.service.to_string(), "Web Development");
    }

    #[test]
    fn test_first_error_is_reported() {
        let mut bad = input();
        bad.name = String::new();
        bad.email = "nope".to_string();
        let err = bad.validate().unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_unknown_service() {
        let mut bad = input();
        bad.service = "Plumbing".to_string();
        assert_eq!(bad.validate().unwrap_err().to_string(), "Invalid service");
    }

    #[test]
    fn test_message_length_limit() {
        let mut long = input();
        long.message = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(long.clone().validate().is_ok());

        long.message.push('x');
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_honeypot() {
        let mut bot = input();
        assert!(!bot.is_spam());
        bot.website = Some("  ".to_string());
        assert!(!bot.is_spam());
        bot.website = Some("http://spam.example".to_string());
        assert!(bot.is_spam());
    }
}
