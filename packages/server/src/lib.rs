// Portfolio API Core
//
// Backend for the portfolio site: admin authentication, blog posts,
// the contact form and image uploads.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
