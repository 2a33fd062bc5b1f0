//! # Slotbook Storage
//!
//! Durable Store adapter: a passive key-value mirror of in-memory state.
//!
//! The store is not a second source of truth. Features write their full
//! record under a fixed key after every mutation (last writer wins, no
//! transactions, no schema versioning) and read it back exactly once at
//! startup. Two keys exist in practice: `events` and `activeUser`.
//!
//! Backends:
//!
//! - [`JsonFileStore`]: one JSON document per key in a directory; survives
//!   process restarts.
//! - [`InMemoryStore`]: in-memory backend for tests.
//! - [`SimulatedLatency`]: decorator that delays every operation by a
//!   jittered interval, standing in for network latency. Because it wraps
//!   only the store, the delay lands inside persistence effects, after the
//!   in-memory mutation already committed.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub mod error;
mod json_file;
mod latency;
mod memory;

pub use error::StorageError;
pub use json_file::JsonFileStore;
pub use latency::SimulatedLatency;
pub use memory::InMemoryStore;

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Boxed future returned by [`DurableStore`] methods.
///
/// Boxed instead of `async fn` so the trait stays dyn-compatible and can be
/// injected as `Arc<dyn DurableStore>`.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Durable key-value persistence.
///
/// Values are JSON documents; callers serialize their own record types.
pub trait DurableStore: Send + Sync {
    /// Read the record stored under `key`, if any.
    fn read_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<Value>>;

    /// Write `value` under `key`, replacing any previous record.
    fn write_record<'a>(&'a self, key: &'a str, value: Value) -> StorageFuture<'a, ()>;

    /// Delete the record under `key`. Removing an absent key is not an error.
    fn remove_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;
}
