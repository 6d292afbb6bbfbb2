use core::fmt;

use crate::field::FieldElement;
use crate::hash::Hash;
use crate::merkle::{verify_path, AuthPath, MerkleError};
use crate::transcript::TranscriptError;

use super::layer::FriLayer;

/// Failures of the FRI commit and decommit phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriError {
    /// Query index leaves no room for the `g x` and `g^2 x` openings.
    QueryIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the evaluation domain.
        length: usize,
    },
    /// Folding reached a single point while the polynomial was not constant.
    MalformedComposition {
        /// Index of the layer that could not be folded.
        layer: usize,
        /// Degree of that layer's polynomial.
        degree: usize,
    },
    /// Layer index does not fit the one-byte transcript label.
    LayerIndexOverflow {
        /// Offending layer index.
        layer: usize,
    },
    /// Evaluation domain was empty.
    EmptyDomain,
    /// Opening a commitment tree failed.
    Merkle(MerkleError),
    /// The transcript rejected an entry.
    Transcript(TranscriptError),
}

impl fmt::Display for FriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriError::QueryIndexOutOfRange { index, length } => write!(
                f,
                "query index {index} is out of range for layer of length {length}"
            ),
            FriError::MalformedComposition { layer, degree } => write!(
                f,
                "layer {layer} still has degree {degree} on a single-point domain"
            ),
            FriError::LayerIndexOverflow { layer } => {
                write!(f, "layer index {layer} exceeds the transcript label range")
            }
            FriError::EmptyDomain => write!(f, "evaluation domain is empty"),
            FriError::Merkle(err) => write!(f, "commitment opening failed: {err}"),
            FriError::Transcript(err) => write!(f, "transcript rejected entry: {err}"),
        }
    }
}

impl std::error::Error for FriError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FriError::Merkle(err) => Some(err),
            FriError::Transcript(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MerkleError> for FriError {
    fn from(err: MerkleError) -> Self {
        FriError::Merkle(err)
    }
}

impl From<TranscriptError> for FriError {
    fn from(err: TranscriptError) -> Self {
        FriError::Transcript(err)
    }
}

/// Output of the commit phase.
#[derive(Debug, Clone)]
pub struct FriCommitment {
    /// Layers in folding order; layer 0 holds the composition polynomial.
    pub layers: Vec<FriLayer>,
    /// `beta_i`, the challenge that produced layer `i + 1`.
    pub fold_challenges: Vec<FieldElement>,
    /// Constant the last layer collapsed to.
    pub final_constant: FieldElement,
}

impl FriCommitment {
    /// Number of folding rounds.
    pub fn num_folds(&self) -> usize {
        self.fold_challenges.len()
    }

    /// Layers that are opened per query (all but the last).
    pub fn opened_layers(&self) -> &[FriLayer] {
        &self.layers[..self.layers.len().saturating_sub(1)]
    }

    /// Last layer.
    pub fn final_layer(&self) -> Option<&FriLayer> {
        self.layers.last()
    }
}

/// A revealed value with its position and authentication path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    /// Leaf index within the committed evaluations.
    pub index: usize,
    /// Revealed evaluation.
    pub value: FieldElement,
    /// Authentication path of the leaf.
    pub path: AuthPath,
}

impl Opening {
    /// Checks the opening against a root over `leaf_count` leaves.
    pub fn verify(&self, root: &Hash, leaf_count: usize) -> Result<(), MerkleError> {
        verify_path(&self.value, self.index, leaf_count, &self.path, root.as_bytes())
    }
}

/// Openings of one non-final FRI layer at `x` and `-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOpenings {
    /// Layer index.
    pub layer: usize,
    /// Opening at `index mod len`.
    pub x: Opening,
    /// Opening at `(index + len/2) mod len`.
    pub neg_x: Opening,
}

/// Everything revealed for a single query, in transcript order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDecommitment {
    /// Query index into the evaluation domain.
    pub index: usize,
    /// Trace openings at `x`, `g x` and `g^2 x`.
    pub trace: [Opening; 3],
    /// Per-layer openings, excluding the last layer.
    pub layers: Vec<LayerOpenings>,
    /// Constant of the last layer.
    pub final_constant: FieldElement,
}
