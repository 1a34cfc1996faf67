//! Infrastructure layer - Storage backends, services and observability

pub mod file_storage;
pub mod logging;
pub mod observability;
pub mod services;
