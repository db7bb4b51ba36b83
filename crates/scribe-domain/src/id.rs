//! Summary identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one summarization request, based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, so saved summary
/// records list in creation order without a separate timestamp index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryId(Uuid);

impl SummaryId {
    /// Generate a new UUIDv7-based SummaryId
    ///
    /// # Examples
    ///
    /// ```
    /// use scribe_domain::SummaryId;
    ///
    /// let id = SummaryId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a SummaryId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a SummaryId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use scribe_domain::SummaryId;
    ///
    /// let id = SummaryId::new();
    /// let parsed = SummaryId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid summary id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0.as_u128()
    }

    /// Milliseconds since the Unix epoch encoded in the identifier
    pub fn timestamp_millis(&self) -> u64 {
        // UUIDv7: top 48 bits are the Unix millisecond timestamp
        (self.value() >> 80) as u64
    }

    /// First eight hex characters, used in compact listings
    pub fn short(&self) -> String {
        self.to_string()[..8].to_string()
    }
}

impl Default for SummaryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SummaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: identifier ordering matches u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = SummaryId::from_value(a);
            let id_b = SummaryId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: string form round-trips
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = SummaryId::from_value(value);
            match SummaryId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
