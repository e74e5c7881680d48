pub mod time;
pub mod toast;
