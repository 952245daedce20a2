use actix_web::{middleware, web};

use crate::{authentication, routes};

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/me")
            .wrap(middleware::from_fn(authentication::reject_non_admin_users))
            .route("/posts/create", web::post().to(routes::create_post))
            .route(
                "/posts/update/{post_id}",
                web::patch().to(routes::update_post),
            )
            .route(
                "/posts/delete/{post_id}",
                web::delete().to(routes::delete_post),
            )
            .route("/posts/get/all", web::get().to(routes::list_all_posts)),
    );
}
