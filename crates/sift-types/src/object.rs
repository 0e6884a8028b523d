use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque identifier in the view namespace.
///
/// Unlike [`HashId`](crate::HashId), an `ObjectId` is not a content hash:
/// its bytes are a serialized compound identifier minted by the view layer,
/// and only that layer knows how to take one apart. Consumers treat the
/// value as opaque. Equality is byte-exact, ordering is lexicographic over
/// the bytes, and clones are cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(Bytes);

impl ObjectId {
    /// Wrap raw identifier bytes.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the identifier in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the identifier holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        if hex.len() > 16 {
            write!(f, "ObjectId({}..)", &hex[..16])
        } else {
            write!(f, "ObjectId({hex})")
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Vec<u8>> for ObjectId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_byte_exact() {
        let a = ObjectId::from_bytes(vec![1, 2, 3]);
        let b = ObjectId::from_bytes(vec![1, 2, 3]);
        let c = ObjectId::from_bytes(vec![1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = ObjectId::from_bytes(vec![1, 2]);
        let b = ObjectId::from_bytes(vec![1, 2, 0]);
        let c = ObjectId::from_bytes(vec![1, 3]);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn display_is_hex() {
        let id = ObjectId::from_bytes(vec![0x01, 0xab]);
        assert_eq!(format!("{id}"), "01ab");
    }

    #[test]
    fn debug_truncates_long_ids() {
        let id = ObjectId::from_bytes(vec![0xcd; 32]);
        let debug = format!("{id:?}");
        assert_eq!(debug, format!("ObjectId({}..)", "cd".repeat(8)));

        let short = ObjectId::from_bytes(vec![0x0f, 0x10]);
        assert_eq!(format!("{short:?}"), "ObjectId(0f10)");
    }

    #[test]
    fn clones_share_bytes() {
        let id = ObjectId::from_bytes(vec![9; 64]);
        let clone = id.clone();
        assert_eq!(id, clone);
        assert_eq!(id.as_bytes().as_ptr(), clone.as_bytes().as_ptr());
    }

    #[test]
    fn serde_roundtrip() {
        let id = ObjectId::from_bytes(vec![1, 0, 255]);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
