// Presentation layer - HTTP view-model handlers
pub mod app_state;
pub mod handlers;
