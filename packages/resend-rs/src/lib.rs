// https://resend.com/docs/api-reference/emails/send-email

use std::fmt;

pub mod models;
use reqwest::{header, Client};

pub use crate::models::{ErrorResponse, SendEmailRequest, SendEmailResponse};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone)]
pub struct ResendOptions {
    pub api_key: String,
    /// Overrides the API host (tests, proxies).
    pub base_url: Option<String>,
}

/// Failure reported by the Resend API or the transport.
#[derive(Debug, Clone)]
pub struct ResendError {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for ResendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "Resend returned {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ResendError {}

#[derive(Debug, Clone)]
pub struct ResendService {
    options: ResendOptions,
    client: Client,
}

impl ResendService {
    pub fn new(options: ResendOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        self.options
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub async fn send_email(
        &self,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, ResendError> {
        let url = format!("{}/emails", self.base_url());

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.options.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await;

        let response = match res {
            Ok(response) => response,
            Err(e) => {
                return Err(ResendError {
                    status: None,
                    message: format!("Request to Resend failed: {}", e),
                })
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Resend returned an error".to_string());
            return Err(ResendError {
                status: Some(status.as_u16()),
                message,
            });
        }

        response
            .json::<SendEmailResponse>()
            .await
            .map_err(|e| ResendError {
                status: Some(status.as_u16()),
                message: format!("Error parsing Resend response: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let service = ResendService::new(ResendOptions {
            api_key: "re_test".to_string(),
            base_url: None,
        });
        assert_eq!(service.base_url(), "https://api.resend.com");
    }

    #[test]
    fn test_error_display_includes_status() {
        let err = ResendError {
            status: Some(403),
            message: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "Resend returned 403: forbidden");
    }
}
