pub mod activity;
pub mod announcement;
pub mod business_info;
pub mod category;
pub mod faq;
pub mod feedback;
pub mod requirement;
pub mod service;
pub mod service_category;
pub mod user;

// Re-export all repositories for easy importing
pub use activity::ActivityRepository;
pub use announcement::{AnnouncementFields, AnnouncementRepository};
pub use business_info::BusinessInfoRepository;
pub use category::CategoryRepository;
pub use faq::FaqRepository;
pub use feedback::FeedbackRepository;
pub use requirement::RequirementRepository;
pub use service::ServiceRepository;
pub use service_category::ServiceCategoryRepository;
pub use user::UserRepository;
