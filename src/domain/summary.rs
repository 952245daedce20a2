use serde::Serialize;
use uuid::Uuid;

/// Public face of a user, embedded in posts and comments.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub profile_image_url: Option<String>,
}

/// The post a comment belongs to, as shown next to the comment.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub cover_image_url: Option<String>,
}
