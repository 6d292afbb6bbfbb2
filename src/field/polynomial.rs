//! Polynomial utilities operating over the prime field.
//! The module provides deterministic arithmetic for trace, constraint and FRI polynomials.

use core::fmt;

use super::prime_field::{batch_inverse, FieldElement, FieldElementOps};

/// Failures raised by polynomial arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolynomialError {
    /// Division by the zero polynomial.
    DivisionByZero,
    /// Exact division left a non-zero remainder of the given degree.
    NonZeroRemainder {
        /// Degree of the remainder.
        degree: usize,
    },
    /// Interpolation points and values have different lengths.
    LengthMismatch {
        /// Number of interpolation points.
        points: usize,
        /// Number of values.
        values: usize,
    },
    /// Interpolation points are not pairwise distinct.
    DuplicatePoint,
}

impl fmt::Display for PolynomialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolynomialError::DivisionByZero => write!(f, "division by the zero polynomial"),
            PolynomialError::NonZeroRemainder { degree } => {
                write!(f, "exact division left a remainder of degree {degree}")
            }
            PolynomialError::LengthMismatch { points, values } => write!(
                f,
                "interpolation expects matching lengths (points: {points}, values: {values})"
            ),
            PolynomialError::DuplicatePoint => write!(f, "interpolation points are not distinct"),
        }
    }
}

impl std::error::Error for PolynomialError {}

/// Dense polynomial represented by coefficients in ascending order.
///
/// Trailing zero coefficients are stripped on construction so that equality
/// and [`Polynomial::degree`] agree on the mathematical object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    /// Coefficients starting from the constant term.
    pub coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Constructs a polynomial from raw coefficients.
    pub fn new(mut coefficients: Vec<FieldElement>) -> Self {
        while coefficients.last().map_or(false, FieldElement::is_zero) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    /// Constant polynomial `c`.
    pub fn constant(value: FieldElement) -> Self {
        Self::new(vec![value])
    }

    /// The identity polynomial `X`.
    pub fn x() -> Self {
        Self::monomial(1, FieldElement::ONE)
    }

    /// Single term `coefficient * X^degree`.
    pub fn monomial(degree: usize, coefficient: FieldElement) -> Self {
        let mut coefficients = vec![FieldElement::ZERO; degree + 1];
        coefficients[degree] = coefficient;
        Self::new(coefficients)
    }

    /// Linear factor `X - root`.
    pub fn linear(root: FieldElement) -> Self {
        Self::new(vec![root.neg(), FieldElement::ONE])
    }

    /// Returns `true` for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Returns the degree of the polynomial or `None` if the polynomial is zero.
    pub fn degree(&self) -> Option<usize> {
        for (idx, coeff) in self.coefficients.iter().enumerate().rev() {
            if !coeff.is_zero() {
                return Some(idx);
            }
        }
        None
    }

    /// Coefficient of `X^index`, zero past the end.
    pub fn coefficient(&self, index: usize) -> FieldElement {
        self.coefficients
            .get(index)
            .copied()
            .unwrap_or(FieldElement::ZERO)
    }

    /// Evaluates the polynomial at the provided point using Horner's method.
    pub fn evaluate(&self, point: &FieldElement) -> FieldElement {
        let mut result = FieldElement::ZERO;
        for coeff in self.coefficients.iter().rev() {
            result = result.mul(point).add(coeff);
        }
        result
    }

    /// Evaluates the polynomial over every point of `domain`, preserving order.
    pub fn evaluate_over(&self, domain: &[FieldElement]) -> Vec<FieldElement> {
        #[cfg(feature = "parallel")]
        {
            if crate::utils::parallelism_enabled() {
                use rayon::prelude::*;
                let chunk = crate::utils::preferred_chunk_size(domain.len());
                return domain
                    .par_iter()
                    .with_min_len(chunk)
                    .map(|point| self.evaluate(point))
                    .collect();
            }
        }
        domain.iter().map(|point| self.evaluate(point)).collect()
    }

    /// Coefficient-wise sum.
    pub fn add(&self, rhs: &Self) -> Self {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        let coefficients = (0..len)
            .map(|i| self.coefficient(i).add(&rhs.coefficient(i)))
            .collect();
        Self::new(coefficients)
    }

    /// Coefficient-wise difference.
    pub fn sub(&self, rhs: &Self) -> Self {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        let coefficients = (0..len)
            .map(|i| self.coefficient(i).sub(&rhs.coefficient(i)))
            .collect();
        Self::new(coefficients)
    }

    /// Additive inverse.
    pub fn neg(&self) -> Self {
        Self::new(self.coefficients.iter().map(FieldElementOps::neg).collect())
    }

    /// Multiplies every coefficient by `scalar`.
    pub fn scale(&self, scalar: &FieldElement) -> Self {
        Self::new(self.coefficients.iter().map(|c| c.mul(scalar)).collect())
    }

    /// Schoolbook product.
    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        let mut coefficients =
            vec![FieldElement::ZERO; self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coefficients.iter().enumerate() {
                coefficients[i + j] = coefficients[i + j].add(&a.mul(b));
            }
        }
        Self::new(coefficients)
    }

    /// `self^exponent` by repeated squaring.
    pub fn pow(&self, mut exponent: usize) -> Self {
        let mut base = self.clone();
        let mut acc = Self::constant(FieldElement::ONE);
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc.mul(&base);
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.mul(&base);
            }
        }
        acc
    }

    /// Long division returning `(quotient, remainder)`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        let divisor_degree = divisor.degree().ok_or(PolynomialError::DivisionByZero)?;
        let lead_inv = divisor.coefficients[divisor_degree]
            .inv()
            .ok_or(PolynomialError::DivisionByZero)?;

        let mut remainder = self.coefficients.clone();
        let Some(dividend_degree) = self.degree() else {
            return Ok((Self::zero(), Self::zero()));
        };
        if dividend_degree < divisor_degree {
            return Ok((Self::zero(), self.clone()));
        }

        let mut quotient = vec![FieldElement::ZERO; dividend_degree - divisor_degree + 1];
        for shift in (0..quotient.len()).rev() {
            let factor = remainder[shift + divisor_degree].mul(&lead_inv);
            if factor.is_zero() {
                continue;
            }
            quotient[shift] = factor;
            for (j, coeff) in divisor.coefficients.iter().enumerate() {
                remainder[shift + j] = remainder[shift + j].sub(&factor.mul(coeff));
            }
        }
        Ok((Self::new(quotient), Self::new(remainder)))
    }

    /// Division that must leave no remainder.
    pub fn div_exact(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        let (quotient, remainder) = self.div_rem(divisor)?;
        match remainder.degree() {
            None => Ok(quotient),
            Some(degree) => Err(PolynomialError::NonZeroRemainder { degree }),
        }
    }

    /// Composition `self(inner(X))` via Horner's rule over polynomials.
    pub fn compose(&self, inner: &Self) -> Self {
        let mut result = Self::zero();
        for coeff in self.coefficients.iter().rev() {
            result = result.mul(inner).add(&Self::constant(*coeff));
        }
        result
    }

    /// `self(factor * X)`, i.e. coefficient `i` scaled by `factor^i`.
    pub fn scale_argument(&self, factor: &FieldElement) -> Self {
        let mut power = FieldElement::ONE;
        let mut coefficients = Vec::with_capacity(self.coefficients.len());
        for coeff in &self.coefficients {
            coefficients.push(coeff.mul(&power));
            power = power.mul(factor);
        }
        Self::new(coefficients)
    }

    /// Coefficients `offset, offset + stride, ...` as a new polynomial.
    ///
    /// With `stride = 2` this yields the even (`offset = 0`) and odd
    /// (`offset = 1`) halves used by FRI folding.
    pub fn coefficients_by_stride(&self, offset: usize, stride: usize) -> Self {
        let mut coefficients = Vec::new();
        let mut index = offset;
        while index < self.coefficients.len() {
            coefficients.push(self.coefficients[index]);
            index += stride;
        }
        Self::new(coefficients)
    }

    /// `prod (X - root)` over all `roots`.
    pub fn vanishing(roots: &[FieldElement]) -> Self {
        let mut coefficients = vec![FieldElement::ONE];
        for root in roots {
            let mut next = vec![FieldElement::ZERO; coefficients.len() + 1];
            for (i, coeff) in coefficients.iter().enumerate() {
                next[i + 1] = next[i + 1].add(coeff);
                next[i] = next[i].sub(&coeff.mul(root));
            }
            coefficients = next;
        }
        Self::new(coefficients)
    }
}

/// Lagrange interpolation through `(points[i], values[i])`.
///
/// Builds the vanishing polynomial once and obtains each basis numerator by
/// synthetic division, so the cost is quadratic in the number of points.
pub fn interpolate(
    points: &[FieldElement],
    values: &[FieldElement],
) -> Result<Polynomial, PolynomialError> {
    if points.len() != values.len() {
        return Err(PolynomialError::LengthMismatch {
            points: points.len(),
            values: values.len(),
        });
    }
    if points.is_empty() {
        return Ok(Polynomial::zero());
    }

    let vanishing = Polynomial::vanishing(points);
    let derivative_at: Vec<FieldElement> = points
        .iter()
        .enumerate()
        .map(|(i, xi)| {
            points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(FieldElement::ONE, |acc, (_, xj)| acc.mul(&xi.sub(xj)))
        })
        .collect();
    let denominators = batch_inverse(&derivative_at).ok_or(PolynomialError::DuplicatePoint)?;

    let n = points.len();
    let mut coefficients = vec![FieldElement::ZERO; n];
    let mut numerator = vec![FieldElement::ZERO; n];
    for ((point, value), denominator) in points.iter().zip(values).zip(&denominators) {
        let weight = value.mul(denominator);
        if weight.is_zero() {
            continue;
        }
        // vanishing / (X - point), highest coefficient first.
        let mut carry = FieldElement::ZERO;
        for k in (0..n).rev() {
            carry = vanishing.coefficient(k + 1).add(&carry.mul(point));
            numerator[k] = carry;
        }
        for (acc, term) in coefficients.iter_mut().zip(&numerator) {
            *acc = acc.add(&term.mul(&weight));
        }
    }
    Ok(Polynomial::new(coefficients))
}
