pub mod config;
pub mod database;
pub mod extraction;
pub mod web;

pub use config::ConfigManager;
pub use web::start_web_server;
