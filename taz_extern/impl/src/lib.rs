pub mod analytics;
pub mod dispatch;
mod http;
