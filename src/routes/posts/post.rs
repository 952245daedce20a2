use crate::authentication::Actor;
use crate::domain::{
    POSTS_PER_PAGE, Page, PageQuery, PostPage, PostRecord, PostResponse, PostStatus, SearchQuery,
    TRENDING_POSTS,
};
use crate::repository::PostStore;
use crate::utils::{build_error_response, error_chain_fmt, message_response};
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum PostError {
    #[error("{0}")]
    ValidationError(String),

    #[error("post not found")]
    NotFound,

    #[error("a post with this slug already exists")]
    SlugTaken,

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for PostError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            PostError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::SlugTaken => StatusCode::CONFLICT,
            PostError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            PostError::UnexpectedError(_) => {
                "the server encountered a problem and could not process your request".to_string()
            }
            _ => self.to_string(),
        };

        build_error_response(status_code, message)
    }
}

#[derive(Deserialize, Debug)]
pub struct PostIdPath {
    pub post_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct SlugPath {
    pub slug: String,
}

#[derive(Deserialize, Debug)]
pub struct TagPath {
    pub tag: String,
}

fn post_list(records: Vec<PostRecord>) -> HttpResponse {
    let posts: Vec<PostResponse> = records.into_iter().map(PostResponse::from).collect();
    HttpResponse::Ok().json(posts)
}

#[tracing::instrument(skip(store), fields(page = %query.page))]
pub async fn list_posts(
    query: web::Query<PageQuery>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    let page = Page::parse(query.page).map_err(PostError::ValidationError)?;

    let listing = store
        .list_posts(PostStatus::Published, page, POSTS_PER_PAGE)
        .await?;

    Ok(HttpResponse::Ok().json(PostPage::new(
        listing,
        PostStatus::Published,
        page,
        POSTS_PER_PAGE,
    )))
}

#[tracing::instrument(skip(store), fields(slug = %path.slug))]
pub async fn get_post_by_slug(
    path: web::Path<SlugPath>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    let post = store
        .find_post_by_slug(&path.slug)
        .await?
        .ok_or(PostError::NotFound)?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

#[tracing::instrument(skip(store), fields(tag = %path.tag))]
pub async fn get_posts_by_tag(
    path: web::Path<TagPath>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    // Tags are stored lowercased
    let tag = path.tag.trim().to_lowercase();

    Ok(post_list(store.posts_by_tag(&tag).await?))
}

#[tracing::instrument(skip(store), fields(q = %query.q))]
pub async fn search_posts(
    query: web::Query<SearchQuery>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(PostError::ValidationError(
            "search query must not be empty".to_string(),
        ));
    }

    Ok(post_list(store.search_posts(q).await?))
}

#[tracing::instrument(skip(store))]
pub async fn trending_posts(store: web::Data<dyn PostStore>) -> Result<HttpResponse, PostError> {
    Ok(post_list(store.trending_posts(TRENDING_POSTS).await?))
}

#[tracing::instrument(skip(store), fields(post_id = %path.post_id))]
pub async fn record_view(
    path: web::Path<PostIdPath>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    if !store.increment_views(path.post_id).await? {
        return Err(PostError::NotFound);
    }

    Ok(message_response("View count incremented"))
}

#[tracing::instrument(skip(store), fields(post_id = %path.post_id, user_id = %actor.user_id))]
pub async fn like_post(
    path: web::Path<PostIdPath>,
    store: web::Data<dyn PostStore>,
    actor: web::ReqData<Actor>,
) -> Result<HttpResponse, PostError> {
    if !store.increment_likes(path.post_id).await? {
        return Err(PostError::NotFound);
    }

    Ok(message_response("Like added"))
}
