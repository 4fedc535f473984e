pub mod admin;

pub use admin::{Admin, AdminProfile, NewAdmin};
