use actix_web::web;

use crate::handlers::{system, uploads};

pub mod analytics;
pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod feedback;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(system::index))
        .route("/health", web::get().to(system::health))
        .route("/uploads/{path:.*}", web::get().to(uploads::serve_upload))
        .service(
            web::scope("/api")
                .configure(auth::configure)
                .configure(catalog::configure)
                .configure(announcements::configure)
                .configure(feedback::configure)
                .configure(analytics::configure),
        );
}
