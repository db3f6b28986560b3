//! Domain aggregates exposed by the staffing service layer.

pub mod allocation;
pub mod audit;
pub mod client;
pub mod listing;
pub mod project;
pub mod resource;
pub mod types;
