use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AuthorSummary;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_profile_image_url: Option<String>,
    pub is_draft: bool,
    pub generated_by_ai: bool,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub tags: Vec<String>,
    pub author: AuthorSummary,
    pub is_draft: bool,
    #[serde(rename = "generatedByAI")]
    pub generated_by_ai: bool,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRecord> for PostResponse {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            slug: record.slug,
            content: record.content,
            cover_image_url: record.cover_image_url,
            tags: record.tags,
            author: AuthorSummary {
                id: record.author_id,
                name: record.author_name,
                profile_image_url: record.author_profile_image_url,
            },
            is_draft: record.is_draft,
            generated_by_ai: record.generated_by_ai,
            views: record.views,
            likes: record.likes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default, rename = "generatedByAI")]
    pub generated_by_ai: bool,
}

/// Absent fields are left as they are.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_draft: Option<bool>,
    #[serde(rename = "generatedByAI")]
    pub generated_by_ai: Option<bool>,
}
