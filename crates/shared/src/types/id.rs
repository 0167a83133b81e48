//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TaskId` where an `AlertId` is expected,
//! which matters on the dashboard because alerts carry both.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(ContactId, "Unique identifier for a contact.");
typed_id!(DealId, "Unique identifier for a deal.");
typed_id!(TaskId, "Unique identifier for a task.");
typed_id!(ActivityId, "Unique identifier for an activity log entry.");
typed_id!(AlertId, "Unique identifier for a dashboard alert.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_display_round_trips_through_from_str() {
        let id = TaskId::new();
        let parsed = TaskId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_typed_id_from_str_error() {
        assert!(AlertId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_typed_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&ContactId(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
