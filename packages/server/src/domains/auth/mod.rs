//! Auth domain - admin login and cookie sessions
//!
//! Responsibilities:
//! - Credential verification against bcrypt hashes
//! - Session JWT issuance and verification
//! - Session cookie lifecycle
//! - Single-admin bootstrap registration

pub mod actions;
pub mod cookie;
pub mod jwt;
pub mod models;
pub mod password;

pub use cookie::{session_token, SessionCookies, SESSION_COOKIE_NAME};
pub use jwt::{Claims, JwtService, TokenError, TOKEN_TTL_SECONDS};
