//! Core traits defined in `nexus-core` and implemented by other crates.

pub mod sequence;
pub mod storage;

pub use sequence::IdSequence;
pub use storage::{ByteStream, StorageProvider};
