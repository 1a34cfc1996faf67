//! File storage backends

mod cloud;
mod factory;
mod filesystem;
mod in_memory;
mod path;

pub use cloud::{CloudRedirectFileStorage, CloudStorageConfig};
pub use factory::{FileStorageConfig, FileStorageFactory};
pub use filesystem::{FileSystemFileStorage, FileSystemStorageConfig};
pub use in_memory::InMemoryFileStorage;
