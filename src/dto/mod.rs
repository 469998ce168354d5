//! DTO modules that bridge HTTP requests with services.

pub mod api;
pub mod submissions;
