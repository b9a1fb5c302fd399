pub mod activity;
pub mod announcement;
pub mod business_info;
pub mod category;
pub mod faq;
pub mod feedback;
pub mod requirement;
pub mod service;
pub mod service_category;
pub mod upload;
pub mod user;

// Re-export all models for easy importing
pub use activity::*;
pub use announcement::*;
pub use business_info::*;
pub use category::*;
pub use faq::*;
pub use feedback::*;
pub use requirement::*;
pub use service::*;
pub use service_category::*;
pub use upload::*;
pub use user::*;
