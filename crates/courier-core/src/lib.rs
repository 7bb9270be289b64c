pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod secure_storage;
pub mod tracing_setup;
