use actix_web::web;

use crate::handlers::analytics;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/visit", web::post().to(analytics::track_visit))
            .route("/interaction", web::post().to(analytics::track_interaction))
            .route(
                "/top-announcements",
                web::get().to(analytics::top_announcements),
            )
            .route("/top-services", web::get().to(analytics::top_services))
            .route("/daily", web::get().to(analytics::daily_activity)),
    );
}
