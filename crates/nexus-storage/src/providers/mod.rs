//! Storage provider implementations.

pub mod local;
pub mod memory;

pub use local::LocalStorageProvider;
pub use memory::MemoryStorageProvider;

use uuid::Uuid;

/// Build a fresh reference: a random prefix plus a filesystem-safe form
/// of the original name.
pub(crate) fn new_reference(name_hint: &str) -> String {
    let sanitized: String = name_hint
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();
    let sanitized = sanitized.trim_start_matches('.');
    if sanitized.is_empty() {
        Uuid::new_v4().simple().to_string()
    } else {
        format!("{}-{}", Uuid::new_v4().simple(), sanitized)
    }
}

/// A reference is acceptable when it names a single entry under the root.
pub(crate) fn is_safe_reference(reference: &str) -> bool {
    !reference.is_empty()
        && !reference.starts_with('.')
        && !reference.contains(['/', '\\'])
        && !reference.contains("..")
}
