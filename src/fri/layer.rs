//! A single committed FRI layer.
//!
//! Layer `i` owns its polynomial, its domain, the evaluations over that domain
//! and the commitment tree over the evaluations.  Leaves use the framing of
//! [`crate::merkle`]: `u32_le(8) || value_le`.

use crate::commitment::CommittedEvaluations;
use crate::field::{FieldElement, Polynomial};

use super::folding::{next_fri_domain, next_fri_polynomial};
use super::types::{FriError, Opening};

/// Committed layer of the FRI folding sequence.
#[derive(Debug, Clone)]
pub struct FriLayer {
    index: usize,
    committed: CommittedEvaluations,
}

impl FriLayer {
    /// Evaluates `polynomial` over `domain` and commits to the evaluations.
    pub fn commit(index: usize, polynomial: Polynomial, domain: Vec<FieldElement>) -> Self {
        Self {
            index,
            committed: CommittedEvaluations::commit(polynomial, domain),
        }
    }

    /// Folds this layer with `beta` into layer `index + 1`.
    pub fn fold(&self, beta: &FieldElement) -> Self {
        let polynomial = next_fri_polynomial(self.polynomial(), beta);
        let domain = next_fri_domain(self.domain());
        Self::commit(self.index + 1, polynomial, domain)
    }

    /// Underlying committed evaluations.
    pub fn committed(&self) -> &CommittedEvaluations {
        &self.committed
    }

    /// Position in the folding sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Layer polynomial.
    pub fn polynomial(&self) -> &Polynomial {
        self.committed.polynomial()
    }

    /// Layer domain.
    pub fn domain(&self) -> &[FieldElement] {
        self.committed.domain()
    }

    /// Evaluations over [`FriLayer::domain`].
    pub fn evaluations(&self) -> &[FieldElement] {
        self.committed.evaluations()
    }

    /// Number of evaluations.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// `true` when the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Merkle root.
    pub fn root(&self) -> [u8; 32] {
        self.committed.root()
    }

    /// Merkle root as lowercase hex.
    pub fn root_hex(&self) -> String {
        self.committed.root_hex()
    }

    /// Opens the evaluation at `position`.
    pub fn open(&self, position: usize) -> Result<Opening, FriError> {
        let (value, path) = self.committed.open(position)?;
        Ok(Opening {
            index: position,
            value,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElementOps;
    use crate::hash::Hash;

    fn coset(size: u64) -> Vec<FieldElement> {
        let h = FieldElement::GENERATOR.pow(FieldElement::group_order() / size);
        (0..size)
            .map(|i| FieldElement::GENERATOR.mul(&h.pow(i)))
            .collect()
    }

    #[test]
    fn fold_commits_next_layer() {
        let polynomial = Polynomial::new((1..=8u64).map(FieldElement::from).collect());
        let layer = FriLayer::commit(0, polynomial.clone(), coset(16));
        let beta = FieldElement::from(4242u64);

        let next = layer.fold(&beta);
        let expected = CommittedEvaluations::commit(
            next_fri_polynomial(&polynomial, &beta),
            next_fri_domain(layer.domain()),
        );
        assert_eq!(next.index(), 1);
        assert_eq!(next.len(), 8);
        assert_eq!(next.root(), expected.root());
        assert_eq!(next.evaluations(), expected.evaluations());
        assert_eq!(next.polynomial().degree(), Some(3));
    }

    #[test]
    fn openings_carry_position_and_verify() -> Result<(), FriError> {
        let polynomial = Polynomial::new((3..=10u64).map(FieldElement::from).collect());
        let layer = FriLayer::commit(2, polynomial, coset(16));
        let root = Hash::from_bytes(layer.root());

        let opening = layer.open(11)?;
        assert_eq!(opening.index, 11);
        assert_eq!(opening.value, layer.evaluations()[11]);
        opening.verify(&root, layer.len())?;

        assert!(matches!(layer.open(16), Err(FriError::Merkle(_))));
        Ok(())
    }
}
