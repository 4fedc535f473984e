//! Uploads domain - images for blog posts, stored in public blob storage

pub mod actions;

pub use actions::{object_key, upload_image, validate_upload, UploadedFile, MAX_UPLOAD_BYTES};
