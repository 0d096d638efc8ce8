//! HTTP handlers and route configuration.

mod appointments;
mod authors;
mod categories;
mod comments;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::create))
                    .route("/{id}", web::get().to(users::get)),
            )
            .service(
                web::scope("/authors")
                    .route("", web::post().to(authors::create))
                    .route("/{id}", web::get().to(authors::get))
                    .route(
                        "/{id}/recompute-rating",
                        web::post().to(authors::recompute_rating),
                    ),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route(
                        "/{id}/subscribers/{user_id}",
                        web::post().to(categories::subscribe),
                    )
                    .route(
                        "/{id}/subscribers/{user_id}",
                        web::delete().to(categories::unsubscribe),
                    ),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/like", web::post().to(posts::like))
                    .route("/{id}/dislike", web::post().to(posts::dislike))
                    .route(
                        "/{id}/categories/{category_id}",
                        web::post().to(posts::attach_category),
                    )
                    .route(
                        "/{id}/categories/{category_id}",
                        web::delete().to(posts::detach_category),
                    )
                    .route("/{id}/comments", web::get().to(comments::list_for_post)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::post().to(comments::create))
                    .route("/{id}/like", web::post().to(comments::like))
                    .route("/{id}/dislike", web::post().to(comments::dislike)),
            )
            .service(
                web::scope("/appointments")
                    .route("", web::post().to(appointments::create))
                    .route("/{id}", web::get().to(appointments::get)),
            ),
    );
}
