//! State shared across all request handlers.

use std::sync::Arc;

use domains::MediaStore;
use services::{AccountService, CommentService, PostService};

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    /// Needed at the edge to render `image_url` in user payloads.
    pub media: Arc<dyn MediaStore>,
}
