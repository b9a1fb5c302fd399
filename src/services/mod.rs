pub mod activity_tracker;
pub mod announcements;
pub mod auth;
pub mod content_filter;
pub mod feedback;
pub mod uploads;

pub use activity_tracker::ActivityTracker;
pub use announcements::AnnouncementService;
pub use auth::{AuthService, Claims};
pub use content_filter::ProfanityFilter;
pub use feedback::FeedbackService;
pub use uploads::UploadStore;
