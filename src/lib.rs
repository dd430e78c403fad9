pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod resolution;
pub mod types;
