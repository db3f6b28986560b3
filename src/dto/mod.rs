//! Data transfer objects shaped for templates and the JSON API.

pub mod api;
pub mod listing;
pub mod projects;
