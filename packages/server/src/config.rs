use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Deployment environment. Controls the `Secure` attribute on the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Outbound email settings for the contact form
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub resend_api_key: String,
    pub to: String,
    pub from: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub environment: Environment,
    pub allowed_origins: Vec<String>,
    /// None when any of RESEND_API_KEY / CONTACT_TO / CONTACT_FROM is missing
    pub contact: Option<ContactConfig>,
    pub blob_read_write_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: require_secret(env::var("JWT_SECRET").ok())?,
            environment: Environment::parse(
                &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            ),
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            contact: contact_from_parts(
                non_empty_var("RESEND_API_KEY"),
                non_empty_var("CONTACT_TO"),
                non_empty_var("CONTACT_FROM"),
            ),
            blob_read_write_token: non_empty_var("BLOB_READ_WRITE_TOKEN"),
        })
    }
}

/// The signing secret is a startup precondition; an absent or blank value is fatal.
pub fn require_secret(value: Option<String>) -> Result<String> {
    match value {
        Some(secret) if !secret.trim().is_empty() => Ok(secret),
        _ => bail!("Missing JWT_SECRET environment variable"),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn contact_from_parts(
    api_key: Option<String>,
    to: Option<String>,
    from: Option<String>,
) -> Option<ContactConfig> {
    Some(ContactConfig {
        resend_api_key: api_key?,
        to: to?,
        from: from?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_is_fatal() {
        assert!(require_secret(None).is_err());
        assert!(require_secret(Some("   ".to_string())).is_err());
        assert_eq!(require_secret(Some("s3cret".to_string())).unwrap(), "s3cret");
    }

    #[test]
    fn test_environment_parse() {
        assert!(Environment::parse("production").is_production());
        assert!(Environment::parse(" PROD ").is_production());
        assert!(!Environment::parse("development").is_production());
        assert!(!Environment::parse("").is_production());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.dev, https://b.dev,,"),
            vec!["https://a.dev".to_string(), "https://b.dev".to_string()]
        );
    }

    #[test]
    fn test_contact_requires_all_parts() {
        assert!(contact_from_parts(Some("k".into()), Some("to".into()), None).is_none());
        let contact =
            contact_from_parts(Some("k".into()), Some("to".into()), Some("from".into())).unwrap();
        assert_eq!(contact.to, "to");
    }
}
