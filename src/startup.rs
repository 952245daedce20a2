use crate::authentication::JwtKeys;
use crate::configuration::{DatabaseSettings, Settings};
use crate::repository::{CommentStore, PgStore, PostStore};
use crate::routes::{admin_routes, comment_routes, health_check, post_routes};
use crate::utils::build_error_response;
use actix_web::dev::Server;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Serves from Postgres.
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let store = Arc::new(PgStore::new(get_connection_pool(&config.database)));
        Self::build_with_store(config, store).await
    }

    pub async fn build_with_store<S>(config: Settings, store: Arc<S>) -> Result<Self, anyhow::Error>
    where
        S: CommentStore + PostStore + 'static,
    {
        let jwt_keys = JwtKeys::new(
            &config.application.jwt_secret,
            config.application.jwt_issuer,
            config.application.token_ttl_hours,
        );

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)
            .with_context(|| "Failed to bind TCP listener for application")?;
        let port = listener
            .local_addr()
            .with_context(|| "Failed to read local address of TCP listener")?
            .port();

        let comments: Arc<dyn CommentStore> = store.clone();
        let posts: Arc<dyn PostStore> = store;
        let server = run(listener, comments, posts, jwt_keys)
            .context("Failed to run Actix web server")?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        self.server.await.context("Server stopped with an error")
    }
}

pub fn get_connection_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(config.connect_options())
}

fn run(
    tcp_listener: TcpListener,
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
    jwt_keys: JwtKeys,
) -> Result<Server, anyhow::Error> {
    let comments: web::Data<dyn CommentStore> = web::Data::from(comments);
    let posts: web::Data<dyn PostStore> = web::Data::from(posts);
    let jwt_keys = web::Data::new(jwt_keys);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
            .configure(configure_routes)
            .app_data(comments.clone())
            .app_data(posts.clone())
            .app_data(jwt_keys.clone())
    })
    .listen(tcp_listener)
    .with_context(|| "Failed to bind Actix server to TCP listener")?
    .run();

    Ok(server)
}

/// Extractor failures get the same JSON body as every other error.
fn bad_request(err: impl std::fmt::Display + std::fmt::Debug + 'static) -> actix_web::Error {
    let response = build_error_response(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .service(
            web::scope("/v1")
                .service(web::scope("/comment").configure(comment_routes))
                .service(web::scope("/post").configure(post_routes))
                .service(web::scope("/admin").configure(admin_routes)),
        );
}
