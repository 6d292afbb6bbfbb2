//! Evaluations of a polynomial over a domain together with their commitment tree.
//!
//! Both the trace extension and every FRI layer are built on this type; it
//! owns the polynomial so that folding and verifier arithmetic can reuse it.

use crate::field::{FieldElement, Polynomial};
use crate::hash::Hash;
use crate::merkle::{AuthPath, MerkleError, MerkleTree};

/// Committed evaluations of a polynomial over an ordered domain.
#[derive(Debug, Clone)]
pub struct CommittedEvaluations {
    polynomial: Polynomial,
    domain: Vec<FieldElement>,
    evaluations: Vec<FieldElement>,
    tree: MerkleTree,
}

impl CommittedEvaluations {
    /// Evaluates `polynomial` over `domain` and commits to the evaluations in order.
    pub fn commit(polynomial: Polynomial, domain: Vec<FieldElement>) -> Self {
        let evaluations = polynomial.evaluate_over(&domain);
        let tree = MerkleTree::from_leaves(&evaluations);
        Self {
            polynomial,
            domain,
            evaluations,
            tree,
        }
    }

    /// Committed polynomial.
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Evaluation points.
    pub fn domain(&self) -> &[FieldElement] {
        &self.domain
    }

    /// Evaluations, aligned with [`CommittedEvaluations::domain`].
    pub fn evaluations(&self) -> &[FieldElement] {
        &self.evaluations
    }

    /// Number of evaluations.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// `true` for an empty domain.
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Commitment tree over the evaluations.
    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Merkle root of the evaluations.
    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    /// Merkle root as lowercase hex.
    pub fn root_hex(&self) -> String {
        Hash::from_bytes(self.root()).to_hex().to_string()
    }

    /// Evaluation at `index` with its authentication path.
    pub fn open(&self, index: usize) -> Result<(FieldElement, AuthPath), MerkleError> {
        let path = self.tree.open(index)?;
        Ok((self.evaluations[index], path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::verify_path;

    fn sample() -> CommittedEvaluations {
        let polynomial = Polynomial::new((1..=5u64).map(FieldElement::from).collect());
        let domain = (10..26u64).map(FieldElement::from).collect();
        CommittedEvaluations::commit(polynomial, domain)
    }

    #[test]
    fn evaluations_follow_domain_order() {
        let committed = sample();
        assert_eq!(committed.len(), 16);
        for (point, value) in committed.domain().iter().zip(committed.evaluations()) {
            assert_eq!(committed.polynomial().evaluate(point), *value);
        }
        assert_eq!(committed.tree().leaf_count(), 16);
        assert_eq!(committed.root_hex().len(), 64);
    }

    #[test]
    fn openings_verify_and_reject_out_of_range() -> Result<(), MerkleError> {
        let committed = sample();
        for index in [0usize, 7, 15] {
            let (value, path) = committed.open(index)?;
            assert_eq!(value, committed.evaluations()[index]);
            verify_path(&value, index, committed.len(), &path, &committed.root())?;
        }
        assert_eq!(
            committed.open(16).unwrap_err(),
            MerkleError::IndexOutOfRange {
                index: 16,
                leaf_count: 16
            }
        );
        Ok(())
    }
}
