//! Storage provider trait for pluggable byte-content backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;
use crate::types::id::StoredRef;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for uploaded-content storage backends.
///
/// The metadata core never interprets the bytes or the returned
/// [`StoredRef`]; it only hands the reference back to the same provider.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Durably store `data` and return a reference to it.
    ///
    /// `name_hint` is the original file name; providers may embed a
    /// sanitized form of it in the reference for operator convenience.
    async fn put(&self, name_hint: &str, data: Bytes) -> AppResult<StoredRef>;

    /// Open a stored object as a byte stream.
    async fn read(&self, stored_ref: &StoredRef) -> AppResult<ByteStream>;

    /// Read a stored object fully into memory.
    async fn read_bytes(&self, stored_ref: &StoredRef) -> AppResult<Bytes>;

    /// Check whether a stored object exists.
    async fn exists(&self, stored_ref: &StoredRef) -> AppResult<bool>;

    /// Delete a stored object. Returns `false` when it was already absent.
    async fn delete(&self, stored_ref: &StoredRef) -> AppResult<bool>;
}
