// Common types and utilities shared across the application

pub mod api_error;
pub mod validation;

pub use api_error::{is_unique_violation, ApiError, ApiResult};
