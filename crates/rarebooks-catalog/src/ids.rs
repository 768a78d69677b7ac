//! Newtype IDs for type-safe identifiers.
//!
//! The marketplace API uses numeric identifiers; wrapping them keeps a
//! `CategoryId` from being passed where a `BookId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident) => {
        /// A numeric identifier assigned by the marketplace API.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// The raw identifier.
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(BookId);
define_id!(CategoryId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_number() {
        let id = BookId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: BookId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!(" 7 ".parse::<CategoryId>().unwrap(), CategoryId::new(7));
        assert!("seven".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(UserId::new(3).to_string(), "3");
    }
}
