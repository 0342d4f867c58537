use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TevaError};
use crate::types::Event;

/// Fixed-width fingerprint of an event's `(start, end, file)` triple, used
/// as the lookup key for its computed statistics.
///
/// The digest is taken over the exact `Display` form of the bounds followed
/// by the file path bytes, so it is representation-sensitive: identical
/// triples always produce identical ids within a process, and any field
/// change produces a different id with overwhelming probability. Collisions
/// are neither detected nor resolved; callers merging bundles from
/// independent runs must re-key by the triple itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId([u8; 32]);

impl EventId {
    pub fn of(event: &Event) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(event.start().to_string().as_bytes());
        hasher.update(event.end().to_string().as_bytes());
        hasher.update(event.file().as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        blake3::Hash::from_hex(s)
            .map(|h| Self(*h.as_bytes()))
            .map_err(|e| TevaError::InvalidParameter(format!("invalid event id '{}': {}", s, e)))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for EventId {
    type Err = TevaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// Hex-string serde so the id can serve as a JSON map key.
impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, file: &str) -> Event {
        Event::new(start, end, file).unwrap()
    }

    #[test]
    fn test_identity_is_stable() {
        let a = EventId::of(&event(1.0, 3.0, "f"));
        let b = EventId::of(&event(1.0, 3.0, "f"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_field_change_changes_identity() {
        let base = EventId::of(&event(1.0, 3.0, "f"));
        assert_ne!(base, EventId::of(&event(2.0, 3.0, "f")));
        assert_ne!(base, EventId::of(&event(1.0, 4.0, "f")));
        assert_ne!(base, EventId::of(&event(1.0, 3.0, "g")));
    }

    #[test]
    fn test_hex_round_trip() {
        let id = EventId::of(&event(0.0, 2.0, "car1.ext"));
        let hex = id.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(EventId::from_hex(&hex).unwrap(), id);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(EventId::from_hex("not hex").is_err());
        assert!(EventId::from_hex("abcd").is_err());
    }
}
