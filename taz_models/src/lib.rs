pub mod analytics;
pub mod color;
pub mod contact;
pub mod spam;
pub mod theme;
pub mod toast;
