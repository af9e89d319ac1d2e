pub mod backend_health_handler;
pub mod ranking_handler;
