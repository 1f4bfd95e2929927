//! Server-assigned polygon identifiers.
//!
//! Ids are 12 bytes rendered as 24 lowercase hex characters:
//! 4 bytes of big-endian Unix seconds, 5 bytes fixed per process, and a
//! 3-byte wrapping counter.

use super::validate::ValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

pub const ID_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00ff_ffff;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PolygonId(String);

struct IdSeed {
    process: [u8; 5],
    counter: AtomicU32,
}

fn seed() -> &'static IdSeed {
    static SEED: OnceLock<IdSeed> = OnceLock::new();
    SEED.get_or_init(|| {
        let mut rng = rand::thread_rng();
        IdSeed {
            process: rng.gen(),
            counter: AtomicU32::new(rng.gen::<u32>() & COUNTER_MASK),
        }
    })
}

impl PolygonId {
    /// Allocates a fresh identifier. Never reassigned once handed out.
    pub fn generate() -> Self {
        let seed = seed();
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let count = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&seed.process);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(hex::encode(bytes))
    }

    /// Parses a client-supplied id. Accepts either hex case; stores lowercase.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::MissingId);
        }
        if raw.len() != ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PolygonId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PolygonId::parse(&value)
    }
}

impl From<PolygonId> for String {
    fn from(id: PolygonId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_24_lowercase_hex() {
        let id = PolygonId::generate();
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(id
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<PolygonId> = (0..10_000).map(|_| PolygonId::generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn parse_normalizes_case() {
        let id = PolygonId::parse("65F1C0DE8A1B2C3D4E5F6A7B").unwrap();
        assert_eq!(id.as_str(), "65f1c0de8a1b2c3d4e5f6a7b");
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert_eq!(PolygonId::parse(""), Err(ValidationError::MissingId));
        assert_eq!(PolygonId::parse("123"), Err(ValidationError::InvalidId));
        assert_eq!(
            PolygonId::parse("65f1c0de8a1b2c3d4e5f6a7g"),
            Err(ValidationError::InvalidId)
        );
        assert_eq!(
            PolygonId::parse("65f1c0de8a1b2c3d4e5f6a7b0"),
            Err(ValidationError::InvalidId)
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<PolygonId, _> = serde_json::from_str("\"65f1c0de8a1b2c3d4e5f6a7b\"");
        assert!(ok.is_ok());
        let bad: Result<PolygonId, _> = serde_json::from_str("\"not-an-id\"");
        assert!(bad.is_err());
    }
}
