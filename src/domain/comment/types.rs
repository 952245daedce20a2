use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{AuthorSummary, PostSummary};

/// One stored comment joined with its author and post, as read from storage.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub post_title: String,
    pub post_cover_image_url: Option<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_profile_image_url: Option<String>,
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment as rendered in a thread, carrying its direct replies.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub id: Uuid,
    pub post: PostSummary,
    pub author: AuthorSummary,
    pub content: String,
    pub parent_comment: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub replies: Vec<CommentNode>,
}

impl From<CommentRecord> for CommentNode {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            post: PostSummary {
                id: record.post_id,
                title: record.post_title,
                cover_image_url: record.post_cover_image_url,
            },
            author: AuthorSummary {
                id: record.author_id,
                name: record.author_name,
                profile_image_url: record.author_profile_image_url,
            },
            content: record.content,
            parent_comment: record.parent_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            replies: Vec::new(),
        }
    }
}
