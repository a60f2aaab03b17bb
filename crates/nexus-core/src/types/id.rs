//! Strongly typed identifiers for folders, files, groups, and principals.
//!
//! Numeric record ids wrap `i64`; ownership keys wrap `String`. With the
//! `sqlx` feature each type is transparently encodable for PostgreSQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype around a positive `i64` record id.
macro_rules! define_record_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw id value.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw id value.
            pub fn get(self) -> i64 {
                self.0
            }

            /// Ids are always strictly positive.
            pub fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

/// Macro to define a newtype around an opaque text key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a key, trimming surrounding whitespace.
            pub fn new(value: impl Into<String>) -> Self {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.len() == value.len() {
                    Self(value)
                } else {
                    Self(trimmed.to_string())
                }
            }

            /// Borrow the key text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the key is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume the key and return the inner text.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

define_record_id!(
    /// Unique identifier for a folder.
    FolderId
);

define_record_id!(
    /// Unique identifier for a file.
    FileId
);

define_key!(
    /// Identifier of the group (research team) that owns folders and files.
    GroupId
);

define_key!(
    /// Email address identifying a principal or a student.
    Email
);

define_key!(
    /// Opaque location token returned by a storage provider.
    StoredRef
);

/// The id namespaces handed out by an [`IdSequence`](crate::traits::IdSequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    /// Folder ids.
    Folder,
    /// File ids.
    File,
}

impl IdKind {
    /// Stable name used as the sequence key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_str() {
        let id: FolderId = " 42 ".parse().expect("should parse");
        assert_eq!(id, FolderId(42));
        assert!("abc".parse::<FileId>().is_err());
    }

    #[test]
    fn test_record_id_validity() {
        assert!(FileId::new(1).is_valid());
        assert!(!FileId::new(0).is_valid());
        assert!(!FileId::new(-3).is_valid());
    }

    #[test]
    fn test_key_is_trimmed() {
        assert_eq!(GroupId::new("  lab-7 ").as_str(), "lab-7");
        assert!(GroupId::new("   ").is_empty());
    }

    #[test]
    fn test_numeric_and_text_group_ids_compare_equal() {
        let from_number = GroupId::from(7.to_string());
        let from_text = GroupId::from("7");
        assert_eq!(from_number, from_text);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&FolderId(5)).expect("serialize");
        assert_eq!(json, "5");
        let email: Email = serde_json::from_str("\"a@x.com\"").expect("deserialize");
        assert_eq!(email.as_str(), "a@x.com");
    }
}
