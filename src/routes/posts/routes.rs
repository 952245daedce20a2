use crate::authentication::reject_anonymous_users;
use crate::routes::{
    get_post_by_slug, get_posts_by_tag, like_post, list_posts, record_view, search_posts,
    trending_posts,
};
use actix_web::middleware::from_fn;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/get/all", web::get().to(list_posts))
        .route("/get/slug/{slug}", web::get().to(get_post_by_slug))
        .route("/get/tag/{tag}", web::get().to(get_posts_by_tag))
        .route("/get/search", web::get().to(search_posts))
        .route("/get/trending", web::get().to(trending_posts))
        .route("/view/{post_id}", web::post().to(record_view))
        // Protected routes (require authentication)
        .service(
            web::scope("/me")
                .wrap(from_fn(reject_anonymous_users))
                .route("/like/{post_id}", web::patch().to(like_post)),
        );
}
