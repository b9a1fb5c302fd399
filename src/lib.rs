use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;
use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;

use database::repositories::{
    ActivityRepository, AnnouncementRepository, BusinessInfoRepository, CategoryRepository,
    FaqRepository, FeedbackRepository, RequirementRepository, ServiceCategoryRepository,
    ServiceRepository, UserRepository,
};
use services::{
    ActivityTracker, AnnouncementService, AuthService, FeedbackService, ProfanityFilter,
    UploadStore,
};

/// Shared handles registered as app data on every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<Config>,
    pub user_repository: web::Data<UserRepository>,
    pub service_repository: web::Data<ServiceRepository>,
    pub category_repository: web::Data<CategoryRepository>,
    pub service_category_repository: web::Data<ServiceCategoryRepository>,
    pub requirement_repository: web::Data<RequirementRepository>,
    pub faq_repository: web::Data<FaqRepository>,
    pub business_info_repository: web::Data<BusinessInfoRepository>,
    pub auth_service: web::Data<AuthService>,
    pub announcement_service: web::Data<AnnouncementService>,
    pub feedback_service: web::Data<FeedbackService>,
    pub activity_tracker: web::Data<ActivityTracker>,
    pub upload_store: web::Data<UploadStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let user_repository = UserRepository::new(pool.clone());
        let service_repository = ServiceRepository::new(pool.clone());
        let announcement_repository = AnnouncementRepository::new(pool.clone());

        let filter = Arc::new(ProfanityFilter::new(
            config.profanity_words_path.as_ref().map(PathBuf::from),
        ));
        log::info!("Profanity filter loaded with {} entries", filter.len());

        let upload_store = UploadStore::new(config.clone());
        let auth_service = AuthService::new(config.clone(), user_repository.clone());
        let announcement_service = AnnouncementService::new(
            announcement_repository.clone(),
            user_repository.clone(),
            upload_store.clone(),
            config.clone(),
        );
        let feedback_service = FeedbackService::new(
            FeedbackRepository::new(pool.clone()),
            service_repository.clone(),
            announcement_repository,
            filter,
        );
        let activity_tracker = ActivityTracker::new(ActivityRepository::new(pool.clone()));

        Self {
            config: web::Data::new(config),
            user_repository: web::Data::new(user_repository),
            service_repository: web::Data::new(service_repository),
            category_repository: web::Data::new(CategoryRepository::new(pool.clone())),
            service_category_repository: web::Data::new(ServiceCategoryRepository::new(
                pool.clone(),
            )),
            requirement_repository: web::Data::new(RequirementRepository::new(pool.clone())),
            faq_repository: web::Data::new(FaqRepository::new(pool.clone())),
            business_info_repository: web::Data::new(BusinessInfoRepository::new(pool)),
            auth_service: web::Data::new(auth_service),
            announcement_service: web::Data::new(announcement_service),
            feedback_service: web::Data::new(feedback_service),
            activity_tracker: web::Data::new(activity_tracker),
            upload_store: web::Data::new(upload_store),
        }
    }

    /// Registers every handle as app data.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.config.clone())
            .app_data(self.user_repository.clone())
            .app_data(self.service_repository.clone())
            .app_data(self.category_repository.clone())
            .app_data(self.service_category_repository.clone())
            .app_data(self.requirement_repository.clone())
            .app_data(self.faq_repository.clone())
            .app_data(self.business_info_repository.clone())
            .app_data(self.auth_service.clone())
            .app_data(self.announcement_service.clone())
            .app_data(self.feedback_service.clone())
            .app_data(self.activity_tracker.clone())
            .app_data(self.upload_store.clone());
    }
}
