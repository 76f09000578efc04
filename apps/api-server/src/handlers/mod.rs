//! HTTP route handlers.

use actix_web::web;

pub mod auth;
pub mod health;
pub mod posts;
pub mod ratings;
pub mod users;

/// Configure all application routes. Literal segments are registered before
/// the `{id}` matcher so `/posts/my` and `/posts/latest` never parse as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/login", web::post().to(auth::login))
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::register))
                    .route("/{id}", web::get().to(users::get_user)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/my", web::get().to(posts::list_mine))
                    .route("/latest", web::get().to(posts::latest))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/publish", web::post().to(posts::toggle_publish))
                    .route("/{id}/ratings", web::post().to(ratings::add))
                    .route("/{id}/ratings", web::delete().to(ratings::remove)),
            ),
    );
}
