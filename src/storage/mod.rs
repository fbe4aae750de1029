use crate::error::StorageError;
use async_trait::async_trait;

pub mod file;
pub mod memory;
pub mod session_repo;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session_repo::SessionRepository;

/// A flat string-to-string store with local-storage semantics.
///
/// Implementations synchronise individual operations only; a sequence of
/// writes is never atomic, so concurrent writers interleave and the last
/// write to a key wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Reads a value.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing medium cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing medium cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing medium cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
