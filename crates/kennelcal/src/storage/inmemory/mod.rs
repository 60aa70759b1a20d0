//! In-memory storage backend.
//!
//! Stores all data in HashMaps wrapped in `Arc<RwLock<_>>`. Useful for
//! development and tests where persistence is not required; the scoped
//! mutation coordinator tests also run against this backend.

mod repository;

pub use repository::InMemoryRepository;
