//! Content-addressed identifiers for proposals and timelock operations.
//!
//! Both ids are 256-bit Blake2b digests of the record's content, so that
//! identical submissions collide deterministically (idempotent duplicate
//! detection). Each id kind hashes under its own domain-separation tag.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b digest over multiple chunks.
///
/// Equivalent to hashing the concatenation of all chunks.
pub fn digest_chunks(chunks: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    hasher.finalize().into()
}

macro_rules! content_id {
    ($(#[$doc:meta])* $name:ident, $tag:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Derive the id from the record's encoded content.
            pub fn derive(chunks: &[&[u8]]) -> Self {
                let mut hasher = Blake2b256::new();
                hasher.update($tag);
                for chunk in chunks {
                    hasher.update(chunk);
                }
                Self(hasher.finalize().into())
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(&self.0))
            }
        }
    };
}

content_id! {
    /// Identifier of a governance proposal, derived from its actions and
    /// description hash.
    ProposalId, b"agora.proposal.v1"
}

content_id! {
    /// Identifier of a scheduled timelock operation, derived from the action
    /// payload digest, the predecessor, and a salt.
    OperationId, b"agora.operation.v1"
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
