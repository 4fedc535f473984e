//! Auth actions - business logic behind the auth routes

pub mod login;
pub mod register;
pub mod session;

pub use login::{login, verify_credentials};
pub use register::{ensure_registration_open, register_admin, Registration, MIN_PASSWORD_LEN};
pub use session::{authenticate, resolve_session, SessionOutcome};
