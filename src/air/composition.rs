//! Pointwise evaluation of the composition polynomial from opened trace values.

use crate::field::{FieldElement, FieldElementOps};
use crate::params::PublicParameters;

use super::errors::{AirError, ConstraintKind};

/// Trace evaluations opened at `x`, `g x` and `g^2 x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOpenings {
    /// `f(x)`.
    pub f_x: FieldElement,
    /// `f(g x)`.
    pub f_gx: FieldElement,
    /// `f(g^2 x)`.
    pub f_ggx: FieldElement,
}

/// Recomputes `cp(x)` from trace openings, as a verifier would.
///
/// `result` is the claimed terminal value and `alphas` the composition
/// coefficients drawn from the transcript.
pub fn deduce_composition_value(
    params: &PublicParameters,
    result: &FieldElement,
    alphas: &[FieldElement; 3],
    x: &FieldElement,
    openings: &TraceOpenings,
) -> Result<FieldElement, AirError> {
    let subgroup = params.subgroup();
    let last_row = params.trace_length() - 1;

    let first_value = divide(
        ConstraintKind::FirstValue,
        x,
        &openings.f_x.sub(&FieldElement::ONE),
        &x.sub(&FieldElement::ONE),
    )?;
    let result = divide(
        ConstraintKind::Result,
        x,
        &openings.f_x.sub(result),
        &x.sub(&subgroup[last_row]),
    )?;

    let excluded = subgroup[last_row - 1..]
        .iter()
        .fold(FieldElement::ONE, |acc, root| acc.mul(&x.sub(root)));
    let subgroup_vanishing = x.pow(params.subgroup_size() as u64).sub(&FieldElement::ONE);
    let transition_denominator = divide(
        ConstraintKind::Transition,
        x,
        &subgroup_vanishing,
        &excluded,
    )?;
    let transition = divide(
        ConstraintKind::Transition,
        x,
        &openings
            .f_ggx
            .sub(&openings.f_gx.square())
            .sub(&openings.f_x.square()),
        &transition_denominator,
    )?;

    Ok(alphas[0]
        .mul(&first_value)
        .add(&alphas[1].mul(&result))
        .add(&alphas[2].mul(&transition)))
}

fn divide(
    constraint: ConstraintKind,
    point: &FieldElement,
    numerator: &FieldElement,
    denominator: &FieldElement,
) -> Result<FieldElement, AirError> {
    numerator
        .div(denominator)
        .ok_or(AirError::VanishingDenominator {
            constraint,
            point: *point,
        })
}
