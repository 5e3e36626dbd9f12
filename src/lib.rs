//! An in-memory, mutex-guarded log collection served over HTTP, plus the
//! client and resource lifecycle used to drive it.

pub mod client;
pub mod config;
pub mod error;
pub mod log;
pub mod models;
pub mod resource;
pub mod routes;
pub mod server;
