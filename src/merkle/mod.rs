//! Binary Blake2s commitment tree over field elements.
//!
//! * Leaves hash `u32_le(len) || payload`, where the payload is the 8-byte
//!   little-endian encoding of a field element.
//! * Inner nodes hash the concatenation of their two children in order.
//! * A missing right child is padded with [`empty_digest`].
//! * Authentication paths list, from leaf to root, the caller position and
//!   the sibling digest at every level.

pub mod tree;
pub mod types;

pub use tree::{
    compute_root_from_path, empty_digest, encode_leaf, hash_internal, hash_leaf, verify_path,
    MerkleTree,
};
pub use types::{AuthPath, MerkleError, MerkleIndex, MerklePathElement};
