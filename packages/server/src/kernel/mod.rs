// Infrastructure: injected stores and external service clients

pub mod blob_storage;
pub mod deps;
pub mod pg_stores;
pub mod rate_limiter;
pub mod test_dependencies;
pub mod traits;

pub use blob_storage::VercelBlobStorage;
pub use deps::{ContactMailer, ResendAdapter, ServerDeps};
pub use pg_stores::{PgAdminStore, PgPostStore};
pub use rate_limiter::FixedWindowRateLimiter;
pub use traits::*;
