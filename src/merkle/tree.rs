use std::sync::OnceLock;

use crate::field::FieldElement;
use crate::hash::{hash, hash_pair, DIGEST_SIZE};

use super::types::{AuthPath, MerkleError, MerkleIndex, MerklePathElement};

const ARITY: usize = 2;
const LEN_PREFIX: usize = 4;
const EMPTY_TAG: &[u8] = b"FIBSQ-MERKLE-EMPTY\0";

static EMPTY_DIGEST: OnceLock<[u8; DIGEST_SIZE]> = OnceLock::new();

/// Digest standing in for a missing right child.
pub fn empty_digest() -> [u8; DIGEST_SIZE] {
    *EMPTY_DIGEST.get_or_init(|| hash(EMPTY_TAG).into_bytes())
}

/// Frames a field element as `u32_le(8) || value_le`.
pub fn encode_leaf(value: &FieldElement) -> Vec<u8> {
    let payload = value.to_le_bytes();
    let mut encoded = Vec::with_capacity(LEN_PREFIX + payload.len());
    encoded.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    encoded.extend_from_slice(&payload);
    encoded
}

/// Hashes an encoded leaf after checking its length prefix.
pub fn hash_leaf(encoded_leaf: &[u8]) -> Result<[u8; DIGEST_SIZE], MerkleError> {
    if encoded_leaf.len() < LEN_PREFIX {
        return Err(MerkleError::LeafLength);
    }
    let mut len_bytes = [0u8; LEN_PREFIX];
    len_bytes.copy_from_slice(&encoded_leaf[..LEN_PREFIX]);
    if u32::from_le_bytes(len_bytes) as usize != encoded_leaf.len() - LEN_PREFIX {
        return Err(MerkleError::LeafLength);
    }
    Ok(hash(encoded_leaf).into_bytes())
}

/// Parent digest of two children.
pub fn hash_internal(left: &[u8; DIGEST_SIZE], right: &[u8; DIGEST_SIZE]) -> [u8; DIGEST_SIZE] {
    hash_pair(left, right).into_bytes()
}

fn hash_field_leaf(value: &FieldElement) -> [u8; DIGEST_SIZE] {
    hash(&encode_leaf(value)).into_bytes()
}

fn hash_leaves(values: &[FieldElement]) -> Vec<[u8; DIGEST_SIZE]> {
    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = crate::utils::preferred_chunk_size(values.len());
            return values
                .par_iter()
                .with_min_len(chunk)
                .map(hash_field_leaf)
                .collect();
        }
    }
    values.iter().map(hash_field_leaf).collect()
}

/// Binary Merkle tree holding every level from the leaf digests to the root.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<[u8; DIGEST_SIZE]>>,
    leaf_count: usize,
}

impl MerkleTree {
    /// Commits to `values` in order.
    pub fn from_leaves(values: &[FieldElement]) -> Self {
        let leaf_count = values.len();
        if leaf_count == 0 {
            return Self {
                levels: vec![vec![empty_digest()]],
                leaf_count,
            };
        }

        let mut levels = vec![hash_leaves(values)];
        while levels[levels.len() - 1].len() > 1 {
            let current = &levels[levels.len() - 1];
            let empty = empty_digest();
            let next: Vec<_> = current
                .chunks(ARITY)
                .map(|pair| hash_internal(&pair[0], pair.get(1).unwrap_or(&empty)))
                .collect();
            levels.push(next);
        }
        Self { levels, leaf_count }
    }

    /// Root digest.
    pub fn root(&self) -> [u8; DIGEST_SIZE] {
        self.levels
            .last()
            .and_then(|level| level.first().copied())
            .unwrap_or_else(empty_digest)
    }

    /// Number of committed leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Authentication path for the leaf at `index`.
    pub fn open(&self, index: usize) -> Result<AuthPath, MerkleError> {
        if index >= self.leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count,
            });
        }

        let mut elements = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut current = index;
        for nodes in &self.levels[..self.levels.len() - 1] {
            let position = current % ARITY;
            let sibling = nodes
                .get(current ^ 1)
                .copied()
                .unwrap_or_else(empty_digest);
            elements.push(MerklePathElement {
                index: MerkleIndex(position as u8),
                sibling,
            });
            current /= ARITY;
        }
        Ok(AuthPath { elements })
    }
}

/// Recomputes the root from an encoded leaf and its authentication path.
pub fn compute_root_from_path(
    leaf: &[u8],
    index: usize,
    leaf_count: usize,
    path: &AuthPath,
) -> Result<[u8; DIGEST_SIZE], MerkleError> {
    if index >= leaf_count {
        return Err(MerkleError::IndexOutOfRange { index, leaf_count });
    }

    let mut digest = hash_leaf(leaf)?;
    let mut current = index;
    let mut nodes_in_level = leaf_count;
    for element in &path.elements {
        let position = current % ARITY;
        if element.index.0 > MerkleIndex::MAX || element.index.0 as usize != position {
            return Err(MerkleError::PathIndexByte);
        }
        let sibling_index = current ^ 1;
        if sibling_index >= nodes_in_level && element.sibling != empty_digest() {
            return Err(MerkleError::EmptyPadding);
        }
        digest = if position == 0 {
            hash_internal(&digest, &element.sibling)
        } else {
            hash_internal(&element.sibling, &digest)
        };
        current /= ARITY;
        nodes_in_level = nodes_in_level.div_ceil(ARITY);
    }

    if current != 0 || nodes_in_level != 1 {
        return Err(MerkleError::PathIndexByte);
    }
    Ok(digest)
}

/// Checks `path` for the leaf holding `value` at `index` against `expected_root`.
pub fn verify_path(
    value: &FieldElement,
    index: usize,
    leaf_count: usize,
    path: &AuthPath,
    expected_root: &[u8; DIGEST_SIZE],
) -> Result<(), MerkleError> {
    let computed = compute_root_from_path(&encode_leaf(value), index, leaf_count, path)?;
    if &computed != expected_root {
        return Err(MerkleError::RootMismatch);
    }
    Ok(())
}
