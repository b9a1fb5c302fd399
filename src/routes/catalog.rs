use actix_web::web;

use crate::handlers::{business_info, categories, faqs, requirements, service_categories, services};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("", web::post().to(services::create_service))
            .route("", web::get().to(services::get_services))
            .route("/{id}", web::get().to(services::get_service))
            .route("/{id}", web::put().to(services::update_service))
            .route("/{id}", web::delete().to(services::delete_service)),
    )
    .service(
        web::scope("/categories")
            .route("", web::post().to(categories::create_category))
            .route("", web::get().to(categories::get_categories))
            .route("/{id}", web::get().to(categories::get_category))
            .route("/{id}", web::put().to(categories::update_category))
            .route("/{id}", web::delete().to(categories::delete_category)),
    )
    .service(
        web::scope("/service-categories")
            .route(
                "",
                web::post().to(service_categories::create_service_category),
            )
            .route(
                "",
                web::get().to(service_categories::get_service_categories),
            )
            .route(
                "/{id}",
                web::get().to(service_categories::get_service_category),
            )
            .route(
                "/{id}",
                web::put().to(service_categories::update_service_category),
            )
            .route(
                "/{id}",
                web::delete().to(service_categories::delete_service_category),
            ),
    )
    .service(
        web::scope("/requirements")
            .route("", web::post().to(requirements::create_requirement))
            .route("", web::get().to(requirements::get_requirements))
            .route("/{id}", web::get().to(requirements::get_requirement))
            .route("/{id}", web::put().to(requirements::update_requirement))
            .route("/{id}", web::delete().to(requirements::delete_requirement)),
    )
    .service(
        web::scope("/faqs")
            .route("", web::post().to(faqs::create_faq))
            .route("", web::get().to(faqs::get_faqs))
            .route("/{id}", web::get().to(faqs::get_faq))
            .route("/{id}", web::put().to(faqs::update_faq))
            .route("/{id}", web::delete().to(faqs::delete_faq)),
    )
    .service(
        web::scope("/business-info")
            .route("", web::post().to(business_info::create_business_info))
            .route("", web::get().to(business_info::get_business_infos))
            .route("/{id}", web::get().to(business_info::get_business_info))
            .route("/{id}", web::put().to(business_info::update_business_info))
            .route(
                "/{id}",
                web::delete().to(business_info::delete_business_info),
            ),
    );
}
