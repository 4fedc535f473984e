//! Posts domain - the blog
//!
//! Public reads by slug; create/update/delete require an admin session.

pub mod actions;
pub mod models;

pub use models::Post;
