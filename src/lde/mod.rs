//! Low-degree extension of the trace.
//!
//! The trace is interpolated over `g^0 .. g^(L-1)` and the interpolant is
//! evaluated over the evaluation coset in natural order.  Evaluation `i`
//! therefore belongs to point `w * h^i`, and moving `blowup` positions ahead
//! corresponds to multiplying the point by `g`.

use tracing::{debug, info};

use crate::air::Trace;
use crate::commitment::CommittedEvaluations;
use crate::field::{interpolate, FieldElement, Polynomial, PolynomialError};
use crate::merkle::{AuthPath, MerkleError};
use crate::params::PublicParameters;

/// Evaluates `poly` over every point of `domain`, preserving order.
pub fn evaluate_over_coset(poly: &Polynomial, domain: &[FieldElement]) -> Vec<FieldElement> {
    poly.evaluate_over(domain)
}

/// Interpolant of `trace` over the first `L` subgroup points.
pub fn interpolate_trace(
    params: &PublicParameters,
    trace: &Trace,
) -> Result<Polynomial, PolynomialError> {
    interpolate(params.trace_points(), trace.values())
}

/// Committed extension of the trace over the evaluation coset.
#[derive(Debug, Clone)]
pub struct LowDegreeExtension {
    committed: CommittedEvaluations,
}

impl LowDegreeExtension {
    /// Interpolates the trace and commits to its extension over the evaluation coset.
    pub fn from_trace(params: &PublicParameters, trace: &Trace) -> Result<Self, PolynomialError> {
        info!(rows = trace.len(), "interpolating trace");
        let polynomial = interpolate_trace(params, trace)?;
        info!(
            domain = params.domain_size(),
            "evaluating low-degree extension"
        );
        let committed =
            CommittedEvaluations::commit(polynomial, params.evaluation_domain().to_vec());
        debug!(root = %committed.root_hex(), "trace extension committed");
        Ok(Self { committed })
    }

    /// Underlying committed evaluations.
    pub fn committed(&self) -> &CommittedEvaluations {
        &self.committed
    }

    /// Trace interpolant.
    pub fn polynomial(&self) -> &Polynomial {
        self.committed.polynomial()
    }

    /// Evaluation coset in natural order.
    pub fn domain(&self) -> &[FieldElement] {
        self.committed.domain()
    }

    /// Evaluations over [`LowDegreeExtension::domain`].
    pub fn evaluations(&self) -> &[FieldElement] {
        self.committed.evaluations()
    }

    /// Size `k` of the evaluation domain.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// `true` for an empty domain.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Merkle root of the evaluations.
    pub fn root(&self) -> [u8; 32] {
        self.committed.root()
    }

    /// Merkle root as lowercase hex.
    pub fn root_hex(&self) -> String {
        self.committed.root_hex()
    }

    /// Evaluation at `index` with its authentication path.
    pub fn open(&self, index: usize) -> Result<(FieldElement, AuthPath), MerkleError> {
        self.committed.open(index)
    }
}
