// HTTP routes
pub mod auth;
pub mod contact;
pub mod health;
pub mod posts;
pub mod upload;

pub use auth::*;
pub use contact::*;
pub use health::*;
pub use posts::*;
pub use upload::*;

use serde::Serialize;

/// `{ "ok": true }`
#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// `{ "ok": true, "message": ... }`
#[derive(Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { ok: true, message }
    }
}
