//! Identifier types for diet forms and catalog entries
//!
//! ID Format:
//! - Field IDs: `f-{7-char-hash}` (e.g., `f-7f2b4c1`) — stable identifiers
//!   for variants and meals, surviving reorderings within the diet form.
//! - Food IDs: integers assigned by the catalog provider.
//! - Portion IDs: short strings assigned by the catalog provider
//!   (e.g., `slice`, `cup-120`).
//!
//! Field ID hashes are derived from name + creation timestamp, ensuring
//! uniqueness. The same name at different times produces different IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid field ID format: expected 'f-{{7-char-hash}}', got '{0}'")]
    InvalidFieldId(String),
}

/// Generates a 7-character hash from a name and timestamp
fn generate_hash(name: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", name, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Stable field identifier in the format `f-{7-char-hash}`
///
/// Variants and meals carry a field ID so their stats subtrees can be
/// correlated by identity rather than by array position. Food entries have
/// no field ID; they align positionally within their meal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldId {
    hash: String,
}

impl FieldId {
    /// Creates a new field ID from a name and timestamp
    pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(name, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f-{}", self.hash)
    }
}

impl FromStr for FieldId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.starts_with("f-") {
            return Err(IdError::InvalidFieldId(s.to_string()));
        }

        let hash = &s[2..];
        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidFieldId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for FieldId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.to_string()
    }
}

/// Catalog key for a food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub u64);

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog key for a portion
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortionId(pub String);

impl PortionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PortionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_format() {
        let id = FieldId::new("Workday", Utc::now());
        let s = id.to_string();

        assert!(s.starts_with("f-"));
        assert_eq!(s.len(), 9);
        assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn same_name_different_time_gives_different_ids() {
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::nanoseconds(1);

        assert_ne!(FieldId::new("Breakfast", t1), FieldId::new("Breakfast", t2));
    }

    #[test]
    fn field_id_roundtrip() {
        let id = FieldId::new("Weekend", Utc::now());
        let parsed: FieldId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn field_id_rejects_bad_input() {
        assert!("x-1234567".parse::<FieldId>().is_err());
        assert!("f-123".parse::<FieldId>().is_err());
        assert!("f-zzzzzzz".parse::<FieldId>().is_err());
        assert!("1234567".parse::<FieldId>().is_err());
    }

    #[test]
    fn field_id_serde() {
        let id = FieldId::new("Lunch", Utc::now());
        let json = serde_json::to_string(&id).unwrap();
        let parsed: FieldId = serde_json::from_str(&json).unwrap();

        assert_eq!(id, parsed);
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn catalog_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&FoodId(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&PortionId::new("slice")).unwrap(),
            "\"slice\""
        );
    }
}
