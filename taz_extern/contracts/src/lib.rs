pub mod analytics;
pub mod dispatch;
