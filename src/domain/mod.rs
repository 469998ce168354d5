pub mod query;
pub mod service;
pub mod submission;
pub mod types;
