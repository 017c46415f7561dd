#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;
pub mod starter;

pub use repository::{InMemoryRepository, Storage, StorageError};
