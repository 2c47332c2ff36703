// Presentation layer - HTTP view over the dashboard state
pub mod app_state;
pub mod handlers;
