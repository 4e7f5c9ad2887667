//! Storage adapter contract and the concrete adapters shipped with the
//! crate.
//!
//! The repository engine only ever reads and writes whole collections as
//! single opaque blobs through this trait. Adapters must make `get` and
//! `put` atomic per key; no cross-key guarantee is assumed.

mod memory;
mod sled;

pub use self::memory::MemoryStore;
pub use self::sled::SledStore;

use crate::error::StoreError;

/// Byte-oriented key-value persistence primitive.
///
/// Methods take `&self` so adapters manage their own interior
/// synchronization.
pub trait KeyValueStore {
    /// Fetches the blob stored under `key`. An unset key is `Ok(None)`,
    /// never an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `value` under `key`, replacing any prior blob.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}
