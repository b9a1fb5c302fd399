use actix_web::web;

use crate::handlers::feedback;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/feedback")
            .route("", web::post().to(feedback::create_feedback))
            .route("", web::get().to(feedback::get_feedback))
            .route(
                "/profanity-words",
                web::post().to(feedback::add_profanity_words),
            )
            .route("/{id}", web::get().to(feedback::get_feedback_by_id)),
    );
}
