#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonCatalog;
pub use repository::{InMemoryRepository, ItemCatalog, MasteryStore, Storage, StorageError};
