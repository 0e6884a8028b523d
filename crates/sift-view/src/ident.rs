//! Compound identifiers for the view namespace.
//!
//! The view layer cannot hand out backing-store hashes directly: what a
//! tree shows depends on which filter produced it and where in the
//! repository it sits, and the resolver must recover all of that from any
//! identifier a caller hands back later. A [`ViewId`] packs the context
//! into one opaque byte string.
//!
//! # Wire format
//!
//! ```text
//! tree: [0x01][varint path len][path][varint filter len][filter][32-byte hash]
//! blob: [0x02][32-byte hash]
//! ```
//!
//! Length framing keeps decoding unambiguous whatever bytes the path or
//! filter id contain, and the leading tag keeps the two shapes disjoint.
//! Blob identifiers deliberately carry no path and no filter: blob content
//! is never filtered, so every reference to the same underlying blob must
//! encode identically no matter which tree or filter it was reached
//! through.

use sift_types::{HashId, ObjectId, RepoPath};

/// Tag byte opening a serialized tree identifier.
const TAG_TREE: u8 = 0x01;
/// Tag byte opening a serialized blob identifier.
const TAG_BLOB: u8 = 0x02;

/// A decoded identifier in the view namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewId {
    /// A directory under a filter: where it lives, which filter shaped it,
    /// and the underlying tree it projects.
    Tree {
        path: RepoPath,
        filter_id: String,
        object: HashId,
    },
    /// File content. Identity is the underlying hash alone.
    Blob { object: HashId },
}

impl ViewId {
    /// Build a tree identifier.
    pub fn tree(path: RepoPath, filter_id: impl Into<String>, object: HashId) -> Self {
        Self::Tree {
            path,
            filter_id: filter_id.into(),
            object,
        }
    }

    /// Build a blob identifier.
    pub fn blob(object: HashId) -> Self {
        Self::Blob { object }
    }

    /// The underlying backing-store hash.
    pub fn object(&self) -> &HashId {
        match self {
            Self::Tree { object, .. } | Self::Blob { object } => object,
        }
    }

    /// Serialize to an opaque view-namespace identifier.
    ///
    /// Deterministic and injective: equal identifiers encode equally,
    /// distinct identifiers never share an encoding, and [`decode`]
    /// restores exactly the input.
    ///
    /// [`decode`]: ViewId::decode
    pub fn encode(&self) -> ObjectId {
        match self {
            Self::Tree {
                path,
                filter_id,
                object,
            } => {
                let path_bytes = path.as_str().as_bytes();
                let filter_bytes = filter_id.as_bytes();
                let mut buf =
                    Vec::with_capacity(1 + 5 + path_bytes.len() + 5 + filter_bytes.len() + 32);
                buf.push(TAG_TREE);
                encode_varint(&mut buf, path_bytes.len() as u64);
                buf.extend_from_slice(path_bytes);
                encode_varint(&mut buf, filter_bytes.len() as u64);
                buf.extend_from_slice(filter_bytes);
                buf.extend_from_slice(object.as_bytes());
                ObjectId::from_bytes(buf)
            }
            Self::Blob { object } => {
                let mut buf = Vec::with_capacity(1 + 32);
                buf.push(TAG_BLOB);
                buf.extend_from_slice(object.as_bytes());
                ObjectId::from_bytes(buf)
            }
        }
    }

    /// Parse an identifier back into its components.
    ///
    /// Never touches a backing store; failures are purely structural.
    pub fn decode(id: &ObjectId) -> Result<Self, DecodeError> {
        let bytes = id.as_bytes();
        let (&tag, rest) = bytes.split_first().ok_or(DecodeError::Empty)?;
        match tag {
            TAG_TREE => {
                let (path_bytes, rest) = take_framed(rest, "path")?;
                let path_str = std::str::from_utf8(path_bytes)
                    .map_err(|_| DecodeError::InvalidUtf8 { field: "path" })?;
                let path = RepoPath::new(path_str)
                    .map_err(|e| DecodeError::InvalidPath(e.to_string()))?;
                let (filter_bytes, rest) = take_framed(rest, "filter id")?;
                let filter_id = std::str::from_utf8(filter_bytes)
                    .map_err(|_| DecodeError::InvalidUtf8 { field: "filter id" })?
                    .to_string();
                let object = take_hash(rest)?;
                Ok(Self::Tree {
                    path,
                    filter_id,
                    object,
                })
            }
            TAG_BLOB => Ok(Self::Blob {
                object: take_hash(rest)?,
            }),
            other => Err(DecodeError::UnknownTag(other)),
        }
    }
}

/// Structural failures while parsing a view-namespace identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty identifier")]
    Empty,

    #[error("unknown identifier tag {0:#04x}")]
    UnknownTag(u8),

    #[error("truncated varint in {field}")]
    TruncatedVarint { field: &'static str },

    #[error("varint overflow in {field}")]
    VarintOverflow { field: &'static str },

    #[error("{field} length {declared} overruns the {remaining} bytes left")]
    LengthOverrun {
        field: &'static str,
        declared: u64,
        remaining: usize,
    },

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("expected 32 trailing hash bytes, found {0}")]
    InvalidHashLength(usize),
}

fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Decode a variable-length integer. Returns (value, bytes consumed).
fn decode_varint(data: &[u8], field: &'static str) -> Result<(u64, usize), DecodeError> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in data.iter().enumerate() {
        value |= ((byte & 0x7F) as u64) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        if shift >= 64 {
            return Err(DecodeError::VarintOverflow { field });
        }
    }
    Err(DecodeError::TruncatedVarint { field })
}

/// Split off a varint-framed field, checking the declared length against
/// what is actually left.
fn take_framed<'a>(
    data: &'a [u8],
    field: &'static str,
) -> Result<(&'a [u8], &'a [u8]), DecodeError> {
    let (declared, consumed) = decode_varint(data, field)?;
    let rest = &data[consumed..];
    if declared > rest.len() as u64 {
        return Err(DecodeError::LengthOverrun {
            field,
            declared,
            remaining: rest.len(),
        });
    }
    Ok(rest.split_at(declared as usize))
}

// Consumes the entire remainder, so trailing bytes surface as a bad hash
// length rather than being ignored.
fn take_hash(data: &[u8]) -> Result<HashId, DecodeError> {
    HashId::from_slice(data).map_err(|_| DecodeError::InvalidHashLength(data.len()))
}
