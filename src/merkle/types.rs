use core::fmt;

use crate::hash::{Hash, DIGEST_SIZE};

/// Position of a node within its parent (`0` left, `1` right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerkleIndex(pub u8);

impl MerkleIndex {
    /// Maximum allowed index for the binary fan-out.
    pub const MAX: u8 = 1;
}

/// One level of an authentication path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePathElement {
    /// Position of the caller node within the parent.
    pub index: MerkleIndex,
    /// Digest of the other child.
    pub sibling: [u8; DIGEST_SIZE],
}

/// Authentication path ordered from leaf to root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthPath {
    /// Path elements, one per tree level below the root.
    pub elements: Vec<MerklePathElement>,
}

impl AuthPath {
    /// Number of levels covered by the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` for the path of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sibling digests in leaf-to-root order.
    pub fn siblings(&self) -> impl Iterator<Item = Hash> + '_ {
        self.elements
            .iter()
            .map(|element| Hash::from_bytes(element.sibling))
    }
}

impl fmt::Display for AuthPath {
    /// Comma-separated lowercase hex siblings, leaf level first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, sibling) in self.siblings().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", sibling.to_hex())?;
        }
        Ok(())
    }
}

/// Errors reported while opening or checking authentication paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    /// The u32 little-endian length prefix disagrees with the payload size.
    LeafLength,
    /// A sibling beyond the last node was not the empty padding digest.
    EmptyPadding,
    /// The recomputed root differs from the expected one.
    RootMismatch,
    /// Requested leaf lies outside the tree.
    IndexOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// A path element carries a position inconsistent with the leaf index.
    PathIndexByte,
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::LeafLength => write!(f, "merkle path invalid: leaf length"),
            MerkleError::EmptyPadding => write!(f, "merkle path invalid: right padding"),
            MerkleError::RootMismatch => write!(f, "merkle path invalid: root mismatch"),
            MerkleError::IndexOutOfRange { index, leaf_count } => write!(
                f,
                "merkle leaf {index} out of range for tree with {leaf_count} leaves"
            ),
            MerkleError::PathIndexByte => write!(f, "merkle path invalid: index byte"),
        }
    }
}

impl std::error::Error for MerkleError {}
