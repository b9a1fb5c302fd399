use actix_web::web;

use crate::handlers::auth;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/refresh", web::post().to(auth::refresh))
            .route("/me", web::get().to(auth::me)),
    )
    .service(
        web::scope("/users")
            .route("", web::get().to(auth::get_users))
            .route("/{id}", web::get().to(auth::get_user)),
    );
}
