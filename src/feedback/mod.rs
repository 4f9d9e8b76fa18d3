//! Feedback layer - display records for a launcher's script filter

pub mod builder;
pub mod config_items;
pub mod items;
pub mod status;

pub use builder::{device_icon, FeedbackBuilder};
pub use config_items::config_items;
pub use items::{DisplayItem, Icon, ScriptFilter};
pub use status::{format_status, StatusSource};
