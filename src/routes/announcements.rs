use actix_web::web;

use crate::handlers::{announcements, uploads};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/announcements")
            .route("", web::post().to(announcements::create_announcement))
            .route("", web::get().to(announcements::get_announcements))
            .route("/{id}", web::get().to(announcements::get_announcement))
            .route("/{id}", web::put().to(announcements::update_announcement))
            .route(
                "/{id}",
                web::delete().to(announcements::delete_announcement),
            ),
    )
    .service(
        web::scope("/uploads")
            .route("/image", web::post().to(uploads::upload_image))
            .route("/video", web::post().to(uploads::upload_video)),
    );
}
