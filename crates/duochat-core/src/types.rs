//! Newtype wrappers for the opaque identifiers DuoChat hands to clients.
//!
//! Both ids are random, URL-safe strings. Using distinct types prevents
//! accidentally passing a session token where a room id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype wrapper around an opaque random string id.
macro_rules! define_opaque_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a new random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            /// Wrap an existing string value.
            pub fn from_string(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner string.
            pub fn into_string(self) -> String {
                self.0
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_opaque_id!(
    /// Identifier of an ephemeral chat room.
    RoomId
);

define_opaque_id!(
    /// Opaque credential binding a connecting party to a room.
    ///
    /// Delivered via the `x-auth-token` cookie and stored in the room's
    /// `connected` membership list.
    SessionToken
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(RoomId::generate(), RoomId::generate());
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let id = RoomId::from_string("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }
}
