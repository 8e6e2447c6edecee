pub mod api;
pub mod classify;
pub mod config;
pub mod prometheus;
pub mod router;
pub mod server;
pub mod v0_endpoint;
