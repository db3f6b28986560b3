//! Database models shared across the staffing repository.

pub mod allocation;
pub mod audit;
#[cfg(feature = "server")]
pub mod auth;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod project;
pub mod resource;
