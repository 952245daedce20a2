mod comment;
mod memory;
mod post;

pub use comment::*;
pub use memory::*;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    CommentRecord, NewComment, NewPost, Page, PostChanges, PostListing, PostRecord, PostStatus,
};
use crate::routes::PostError;

/// Where comments live. Reads come back in ascending creation order.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_comments_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, anyhow::Error>;

    async fn find_all_comments(&self) -> Result<Vec<CommentRecord>, anyhow::Error>;

    async fn find_comment(&self, id: Uuid) -> Result<Option<CommentRecord>, anyhow::Error>;

    async fn insert_comment(
        &self,
        comment: &NewComment,
        author_id: Uuid,
    ) -> Result<CommentRecord, anyhow::Error>;

    /// Returns `false` when there was no such comment.
    async fn delete_comment(&self, id: Uuid) -> Result<bool, anyhow::Error>;

    /// Removes the direct replies of `parent_id` and returns how many there were.
    async fn delete_comments_by_parent(&self, parent_id: Uuid) -> Result<u64, anyhow::Error>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert_post(&self, post: &NewPost, author_id: Uuid) -> Result<PostRecord, PostError>;

    async fn update_post(&self, id: Uuid, changes: &PostChanges)
    -> Result<PostRecord, PostError>;

    /// Also removes the post's comments. Returns `false` when there was no such post.
    async fn delete_post(&self, id: Uuid) -> Result<bool, anyhow::Error>;

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, anyhow::Error>;

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, anyhow::Error>;

    /// Most recently updated first.
    async fn list_posts(
        &self,
        status: PostStatus,
        page: Page,
        per_page: i64,
    ) -> Result<PostListing, anyhow::Error>;

    /// Published posts carrying `tag`.
    async fn posts_by_tag(&self, tag: &str) -> Result<Vec<PostRecord>, anyhow::Error>;

    /// Published posts whose title or content contains `query`, ignoring case.
    async fn search_posts(&self, query: &str) -> Result<Vec<PostRecord>, anyhow::Error>;

    async fn increment_views(&self, id: Uuid) -> Result<bool, anyhow::Error>;

    async fn increment_likes(&self, id: Uuid) -> Result<bool, anyhow::Error>;

    /// Published posts by views, then likes, descending.
    async fn trending_posts(&self, limit: i64) -> Result<Vec<PostRecord>, anyhow::Error>;
}

/// Postgres-backed implementation of both stores.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
