// Application layer - Pollers, the repeating task and the source port
pub mod dashboard_service;
pub mod repeating_task;
pub mod series_poller;
pub mod status_poller;
pub mod telemetry_source;
