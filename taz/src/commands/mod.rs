pub mod history;
pub mod submit;
pub mod theme;
