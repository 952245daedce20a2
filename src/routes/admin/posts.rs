use actix_web::{HttpResponse, web};

use crate::authentication::Actor;
use crate::domain::{
    CreatePostPayload, NewPost, POSTS_PER_PAGE, Page, PostChanges, PostListQuery, PostPage,
    PostResponse, PostStatus, UpdatePostPayload,
};
use crate::repository::PostStore;
use crate::routes::{PostError, PostIdPath};
use crate::utils::message_response;

#[tracing::instrument(skip(store, payload), fields(user_id = %actor.user_id))]
pub async fn create_post(
    payload: web::Json<CreatePostPayload>,
    store: web::Data<dyn PostStore>,
    actor: web::ReqData<Actor>,
) -> Result<HttpResponse, PostError> {
    let post = NewPost::try_from(payload.into_inner()).map_err(PostError::ValidationError)?;

    let record = store.insert_post(&post, actor.user_id).await?;
    tracing::info!(post_id = %record.id, slug = %record.slug, "Post created");

    Ok(HttpResponse::Created().json(PostResponse::from(record)))
}

#[tracing::instrument(skip(store, payload), fields(post_id = %path.post_id))]
pub async fn update_post(
    path: web::Path<PostIdPath>,
    payload: web::Json<UpdatePostPayload>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    let changes =
        PostChanges::try_from(payload.into_inner()).map_err(PostError::ValidationError)?;

    let record = store.update_post(path.post_id, &changes).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(record)))
}

#[tracing::instrument(skip(store), fields(post_id = %path.post_id))]
pub async fn delete_post(
    path: web::Path<PostIdPath>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    if !store.delete_post(path.post_id).await? {
        return Err(PostError::NotFound);
    }

    Ok(message_response("Post deleted"))
}

#[tracing::instrument(skip(store), fields(status = %query.status, page = %query.page))]
pub async fn list_all_posts(
    query: web::Query<PostListQuery>,
    store: web::Data<dyn PostStore>,
) -> Result<HttpResponse, PostError> {
    let status = PostStatus::parse(&query.status).map_err(PostError::ValidationError)?;
    let page = Page::parse(query.page).map_err(PostError::ValidationError)?;

    let listing = store.list_posts(status, page, POSTS_PER_PAGE).await?;

    Ok(HttpResponse::Ok().json(PostPage::new(listing, status, page, POSTS_PER_PAGE)))
}
