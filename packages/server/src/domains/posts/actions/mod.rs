pub mod core;

pub use self::core::{
    create_post, delete_post, get_post, list_posts, update_post, CreatePostInput,
    UpdatePostInput,
};
