use std::fmt::{self, Debug, Formatter};

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    authentication::Actor,
    domain::{CommentNode, CreateCommentPayload, NewComment, build_comment_tree},
    repository::{self, CommentStore, PostStore},
    utils,
};

#[derive(thiserror::Error)]
pub enum CommentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("comment not found")]
    NotFound,

    #[error("post not found")]
    PostNotFound,

    #[error("not authorized to perform this action")]
    Forbidden,

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for CommentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for CommentError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, message) = match self {
            CommentError::ValidationError(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            CommentError::NotFound | CommentError::PostNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            CommentError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            CommentError::UnexpectedError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "the server encountered a problem and could not process your request".to_string(),
            ),
        };

        utils::build_error_response(status_code, message)
    }
}

#[derive(Deserialize, Debug)]
pub struct PostPathParams {
    pub post_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct CommentPathParams {
    pub comment_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCommentResponse {
    message: &'static str,
    deleted_replies: u64,
}

#[tracing::instrument(skip(store))]
pub async fn show_all_comments(
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let records = store.find_all_comments().await?;

    Ok(HttpResponse::Ok().json(build_comment_tree(records)))
}

#[tracing::instrument(skip(store), fields(post_id = %path.post_id))]
pub async fn show_comments_for_post(
    path: web::Path<PostPathParams>,
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let records = store.find_comments_by_post(path.post_id).await?;

    Ok(HttpResponse::Ok().json(build_comment_tree(records)))
}

#[tracing::instrument(skip(store, posts), fields(user_id = %actor.user_id))]
pub async fn create_comment(
    payload: web::Json<CreateCommentPayload>,
    store: web::Data<dyn CommentStore>,
    posts: web::Data<dyn PostStore>,
    actor: web::ReqData<Actor>,
) -> Result<HttpResponse, CommentError> {
    let comment = NewComment::try_from(payload.into_inner())
        .map_err(CommentError::ValidationError)?;

    if posts.find_post_by_id(comment.post_id).await?.is_none() {
        return Err(CommentError::PostNotFound);
    }

    if let Some(parent_id) = comment.parent_id {
        let parent = store.find_comment(parent_id).await?;
        if !parent.is_some_and(|p| p.post_id == comment.post_id) {
            return Err(CommentError::ValidationError(
                "parent comment does not exist on this post".to_string(),
            ));
        }
    }

    let record = store.insert_comment(&comment, actor.user_id).await?;

    Ok(HttpResponse::Created().json(CommentNode::from(record)))
}

#[tracing::instrument(skip(store), fields(comment_id = %path.comment_id, user_id = %actor.user_id))]
pub async fn delete_comment(
    path: web::Path<CommentPathParams>,
    store: web::Data<dyn CommentStore>,
    actor: web::ReqData<Actor>,
) -> Result<HttpResponse, CommentError> {
    let comment_id = path.comment_id;

    let comment = store
        .find_comment(comment_id)
        .await?
        .ok_or(CommentError::NotFound)?;

    if !actor.can_modify(comment.author_id) {
        return Err(CommentError::Forbidden);
    }

    let deleted_replies = repository::delete_comment_thread(store.get_ref(), comment_id).await?;

    Ok(HttpResponse::Ok().json(DeleteCommentResponse {
        message: "Comment and any replies deleted successfully",
        deleted_replies,
    }))
}
