//! Typed identifiers for every ledger entity
//!
//! Each entity gets its own UUID newtype, so a `MonthId` can never be passed
//! where a `CategoryId` is expected. The `Display` form is a short,
//! human-friendly prefix plus the first eight hex digits; `FromStr` needs the
//! full UUID (optionally carrying the prefix).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// The full hyphenated UUID, suitable for round-tripping
            pub fn full(&self) -> String {
                self.0.to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(BudgetId, "bud-");
define_id!(AccountId, "acc-");
define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(CategoryGroupId, "grp-");
define_id!(MonthId, "mon-");
define_id!(MonthCategoryId, "mcat-");
define_id!(PayeeId, "pay-");
define_id!(UserId, "usr-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let id = AccountId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = AccountId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("acc-"));
        assert_eq!(display.len(), 12); // "acc-" + 8 chars

        let id = MonthCategoryId::new();
        assert!(id.to_string().starts_with("mcat-"));
    }

    #[test]
    fn test_from_str_accepts_full_uuid_only() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: BudgetId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: BudgetId = format!("bud-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);

        // The short display form is not enough to recover the id
        assert!(id.to_string().parse::<BudgetId>().is_err());
    }

    #[test]
    fn test_id_equality() {
        let id1 = AccountId::new();
        let id2 = id1;
        assert_eq!(id1, id2);

        let id3 = AccountId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_serialization() {
        let id = AccountId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = AccountId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_different_id_types_not_mixable() {
        let month_id = MonthId::new();
        let category_id = CategoryId::new();

        // assert_ne!(month_id, category_id) would not compile
        assert_ne!(month_id.as_uuid(), category_id.as_uuid());
    }
}
