pub mod analytics;
pub mod announcements;
pub mod auth;
pub mod business_info;
pub mod categories;
pub mod faqs;
pub mod feedback;
pub mod requirements;
pub mod service_categories;
pub mod services;
pub mod shared;
pub mod system;
pub mod uploads;
