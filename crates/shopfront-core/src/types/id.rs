//! Newtype wrappers around `String` for all domain entity identifiers.
//!
//! The backend issues opaque string identifiers, so the wrappers carry a
//! `String` rather than a UUID. Using distinct types prevents accidentally
//! passing an `OrderId` where a `StoreId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string value.
            pub fn into_string(self) -> String {
                self.0
            }

            /// Whether the identifier is empty or whitespace-only.
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(
    /// Identifier of a store (doubles as the realtime room identifier).
    StoreId
);

define_id!(
    /// Identifier of an order on the backend.
    OrderId
);

define_id!(
    /// Identifier of a locally stored notification.
    NotificationId
);

impl NotificationId {
    /// Generate a fresh random notification identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
