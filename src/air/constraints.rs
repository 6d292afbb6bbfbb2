//! Constraint quotient polynomials.
//!
//! Each constraint is a numerator that must vanish on a known set of trace
//! points; dividing by the vanishing polynomial of that set yields a
//! polynomial exactly when the trace satisfies the constraint.

use tracing::debug;

use crate::field::{FieldElement, FieldElementOps, Polynomial, PolynomialError};
use crate::params::PublicParameters;

use super::errors::{AirError, ConstraintKind};

/// The three quotients in their fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintPolynomials {
    /// `p0 = (f - 1) / (X - 1)`.
    pub first_value: Polynomial,
    /// `p1 = (f - result) / (X - g^(L-1))`.
    pub result: Polynomial,
    /// `p2 = (f(g^2 X) - f(g X)^2 - f^2) / prod_{j < L-2} (X - g^j)`.
    pub transition: Polynomial,
}

impl ConstraintPolynomials {
    /// Quotients as an array ordered like the composition coefficients.
    pub fn as_array(&self) -> [&Polynomial; 3] {
        [&self.first_value, &self.result, &self.transition]
    }

    /// Composition polynomial `alpha_0 p0 + alpha_1 p1 + alpha_2 p2`.
    pub fn combine(&self, alphas: &[FieldElement; 3]) -> Polynomial {
        self.as_array()
            .into_iter()
            .zip(alphas)
            .fold(Polynomial::zero(), |acc, (quotient, alpha)| {
                acc.add(&quotient.scale(alpha))
            })
    }
}

/// Vanishing polynomial of the points the transition constraint is enforced on.
///
/// Equals `(X^n - 1) / prod_{j=L-2}^{n-1} (X - g^j)`: every subgroup point
/// except the last two trace rows and the unused tail.
pub fn transition_denominator(params: &PublicParameters) -> Result<Polynomial, AirError> {
    let n = params.subgroup_size();
    let excluded = &params.subgroup()[params.trace_length() - 2..];
    let subgroup_vanishing =
        Polynomial::monomial(n, FieldElement::ONE).sub(&Polynomial::constant(FieldElement::ONE));
    Ok(subgroup_vanishing.div_exact(&Polynomial::vanishing(excluded))?)
}

/// Builds the three quotients for `trace_poly`, claiming terminal value `result`.
pub fn build_constraints(
    trace_poly: &Polynomial,
    params: &PublicParameters,
    result: &FieldElement,
) -> Result<ConstraintPolynomials, AirError> {
    let g = params.trace_generator();
    let last_point = params.trace_points()[params.trace_length() - 1];

    let first_value = quotient(
        ConstraintKind::FirstValue,
        &trace_poly.sub(&Polynomial::constant(FieldElement::ONE)),
        &Polynomial::linear(FieldElement::ONE),
    )?;
    let result = quotient(
        ConstraintKind::Result,
        &trace_poly.sub(&Polynomial::constant(*result)),
        &Polynomial::linear(last_point),
    )?;

    let shifted_once = trace_poly.scale_argument(&g);
    let shifted_twice = trace_poly.scale_argument(&g.square());
    let numerator = shifted_twice
        .sub(&shifted_once.mul(&shifted_once))
        .sub(&trace_poly.mul(trace_poly));
    let transition = quotient(
        ConstraintKind::Transition,
        &numerator,
        &transition_denominator(params)?,
    )?;

    debug!(
        first_value = ?first_value.degree(),
        result = ?result.degree(),
        transition = ?transition.degree(),
        "constraint quotients built"
    );
    Ok(ConstraintPolynomials {
        first_value,
        result,
        transition,
    })
}

fn quotient(
    constraint: ConstraintKind,
    numerator: &Polynomial,
    denominator: &Polynomial,
) -> Result<Polynomial, AirError> {
    numerator
        .div_exact(denominator)
        .map_err(|err| match err {
            PolynomialError::NonZeroRemainder { .. } => AirError::InvalidTrace { constraint },
            other => AirError::Polynomial(other),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::trace::Trace;
    use crate::config::{ProverConfig, PROFILE_FIBSQ_1023};
    use crate::field::interpolate;

    fn small_setup() -> (PublicParameters, Trace, Polynomial) {
        let config = ProverConfig {
            trace_length: 15,
            subgroup_size: 16,
            blowup_factor: 4,
            query_count: 1,
            expected_result: None,
            self_check: true,
        };
        let params = PublicParameters::derive(&config).expect("valid config");
        let trace = Trace::build(7, 15).expect("valid trace");
        let poly = interpolate(params.trace_points(), trace.values()).expect("distinct points");
        (params, trace, poly)
    }

    #[test]
    fn transition_denominator_vanishes_on_enforced_rows() -> Result<(), AirError> {
        let (params, _, _) = small_setup();
        let denominator = transition_denominator(&params)?;
        assert_eq!(denominator.degree(), Some(params.trace_length() - 2));
        for (j, point) in params.subgroup().iter().enumerate() {
            let vanishes = denominator.evaluate(point).is_zero();
            assert_eq!(vanishes, j < params.trace_length() - 2, "row {j}");
        }
        Ok(())
    }

    #[test]
    fn honest_trace_divides_exactly() -> Result<(), AirError> {
        let (params, trace, poly) = small_setup();
        let quotients = build_constraints(&poly, &params, &trace.result())?;
        let l = params.trace_length();
        assert_eq!(quotients.first_value.degree(), Some(l - 2));
        assert_eq!(quotients.result.degree(), Some(l - 2));
        assert_eq!(quotients.transition.degree(), Some(l));
        Ok(())
    }

    #[test]
    fn wrong_result_is_rejected() {
        let (params, trace, poly) = small_setup();
        let wrong = trace.result().add(&FieldElement::ONE);
        assert_eq!(
            build_constraints(&poly, &params, &wrong),
            Err(AirError::InvalidTrace {
                constraint: ConstraintKind::Result
            })
        );
    }

    #[test]
    fn corrupted_trace_breaks_transition() {
        let (params, trace, _) = small_setup();
        let mut values = trace.values().to_vec();
        values[6] = values[6].add(&FieldElement::ONE);
        let poly = interpolate(params.trace_points(), &values).expect("distinct points");
        assert_eq!(
            build_constraints(&poly, &params, &trace.result()),
            Err(AirError::InvalidTrace {
                constraint: ConstraintKind::Transition
            })
        );
    }

    #[test]
    fn corrupted_first_row_is_rejected() {
        let (params, trace, _) = small_setup();
        let mut values = trace.values().to_vec();
        values[0] = FieldElement::from(2u64);
        let poly = interpolate(params.trace_points(), &values).expect("distinct points");
        assert_eq!(
            build_constraints(&poly, &params, &trace.result()),
            Err(AirError::InvalidTrace {
                constraint: ConstraintKind::FirstValue
            })
        );
    }

    #[test]
    fn composition_of_canonical_claim_has_degree_trace_length() -> Result<(), AirError> {
        let params = PublicParameters::derive(&PROFILE_FIBSQ_1023).expect("canonical profile");
        let trace = Trace::build(3_141_592, 1023)?;
        let poly = interpolate(params.trace_points(), trace.values())?;
        let quotients = build_constraints(&poly, &params, &trace.result())?;
        let alphas = [
            FieldElement::from(3u64),
            FieldElement::from(5u64),
            FieldElement::from(7u64),
        ];
        assert_eq!(quotients.combine(&alphas).degree(), Some(1023));
        Ok(())
    }
}
