//! Storage crate: key-value persistence behind the relay bot.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`kv`] – KvStore trait
//! - [`sqlite_kv`] – SqliteKvStore (SQLite via sqlx)
//! - [`memory_kv`] – InMemoryKvStore
//! - [`relay_store`] – typed repositories (relay mapping, block flag, notification timestamp)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod kv;
mod memory_kv;
mod relay_store;
mod sqlite_kv;
mod sqlite_pool;


pub use error::StorageError;
pub use kv::KvStore;
pub use memory_kv::InMemoryKvStore;
pub use relay_store::{
    BlockRepository, NotificationRepository, RelayMappingRepository, RelayStore,
};
pub use sqlite_kv::SqliteKvStore;
pub use sqlite_pool::SqlitePoolManager;
