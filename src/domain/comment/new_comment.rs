use serde::Deserialize;
use uuid::Uuid;

use crate::domain::CommentContent;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Uuid,
    pub content: CommentContent,
    /// `None` for a top-level comment.
    pub parent_id: Option<Uuid>,
}

impl NewComment {
    pub fn new(
        post_id: String,
        content: String,
        parent_comment: Option<String>,
    ) -> Result<Self, String> {
        let post_id = Uuid::parse_str(post_id.trim())
            .map_err(|_| "Invalid postId: must be a valid UUID".to_string())?;

        // Clients send "" for "no parent"
        let parent_id = match parent_comment.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| "Invalid parentComment: must be a valid UUID".to_string())?,
            ),
        };

        Ok(Self {
            post_id,
            content: CommentContent::parse(content)?,
            parent_id,
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentPayload {
    pub post_id: String,
    pub content: String,
    #[serde(default)]
    pub parent_comment: Option<String>,
}

impl TryFrom<CreateCommentPayload> for NewComment {
    type Error = String;

    fn try_from(value: CreateCommentPayload) -> Result<Self, Self::Error> {
        NewComment::new(value.post_id, value.content, value.parent_comment)
    }
}
