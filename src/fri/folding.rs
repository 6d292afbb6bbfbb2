//! Binary FRI folding.
//!
//! Writing `p(X) = even(X^2) + X * odd(X^2)`, one round maps `p` to
//! `even + beta * odd` and the domain `D` to `{ x^2 | x in D[..|D|/2] }`.
//! For a coset of a power-of-two subgroup the second half of `D` is the
//! negation of the first, so the squares of the first half cover the whole
//! squared domain exactly once.

use crate::field::{FieldElement, FieldElementOps, Polynomial};

/// Squares of the first half of `domain`.
pub fn next_fri_domain(domain: &[FieldElement]) -> Vec<FieldElement> {
    domain[..domain.len() / 2]
        .iter()
        .map(FieldElementOps::square)
        .collect()
}

/// `even + beta * odd`, where `even`/`odd` take every other coefficient.
pub fn next_fri_polynomial(poly: &Polynomial, beta: &FieldElement) -> Polynomial {
    let even = poly.coefficients_by_stride(0, 2);
    let odd = poly.coefficients_by_stride(1, 2);
    even.add(&odd.scale(beta))
}

/// Folds `poly` and `domain` and evaluates the result over the new domain.
pub fn next_fri_layer(
    poly: &Polynomial,
    domain: &[FieldElement],
    beta: &FieldElement,
) -> (Polynomial, Vec<FieldElement>, Vec<FieldElement>) {
    let next_poly = next_fri_polynomial(poly, beta);
    let next_domain = next_fri_domain(domain);
    let next_evaluations = next_poly.evaluate_over(&next_domain);
    (next_poly, next_domain, next_evaluations)
}

/// Rounds needed to fold a polynomial of `degree` down to a constant, `ceil(log2(degree + 1))`.
pub fn fold_count(degree: usize) -> usize {
    (usize::BITS - degree.leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(value: u64) -> FieldElement {
        FieldElement::from(value)
    }

    #[test]
    fn fold_count_matches_log2() {
        assert_eq!(fold_count(0), 0);
        assert_eq!(fold_count(1), 1);
        assert_eq!(fold_count(2), 2);
        assert_eq!(fold_count(4), 3);
        assert_eq!(fold_count(1023), 10);
        assert_eq!(fold_count(1024), 11);
    }

    #[test]
    fn folded_polynomial_matches_pointwise_formula() {
        // p(x) + p(-x) = 2 even(x^2), p(x) - p(-x) = 2x odd(x^2).
        let poly = Polynomial::new((1..=9u64).map(fe).collect());
        let beta = fe(12345);
        let folded = next_fri_polynomial(&poly, &beta);
        assert_eq!(folded.degree(), Some(4));

        let two_inv = fe(2).inv().expect("two is invertible");
        for x in [fe(3), fe(77), fe(1 << 20)] {
            let (px, pnx) = (poly.evaluate(&x), poly.evaluate(&x.neg()));
            let even = px.add(&pnx).mul(&two_inv);
            let odd = px
                .sub(&pnx)
                .mul(&two_inv)
                .mul(&x.inv().expect("non-zero point"));
            assert_eq!(folded.evaluate(&x.square()), even.add(&beta.mul(&odd)));
        }
    }

    #[test]
    fn folding_is_pure() {
        let poly = Polynomial::new((1..=16u64).map(fe).collect());
        let domain: Vec<_> = (1..=8u64).map(fe).collect();
        let first = next_fri_layer(&poly, &domain, &fe(9));
        let second = next_fri_layer(&poly, &domain, &fe(9));
        assert_eq!(first, second);
    }

    #[test]
    fn domain_halves_and_squares() {
        let h = FieldElement::GENERATOR.pow(FieldElement::group_order() / 16);
        let domain: Vec<_> = (0..16u64)
            .map(|i| FieldElement::GENERATOR.mul(&h.pow(i)))
            .collect();
        let next = next_fri_domain(&domain);
        assert_eq!(next.len(), 8);
        for (i, point) in next.iter().enumerate() {
            assert_eq!(*point, domain[i].square());
            assert_eq!(*point, domain[i + 8].square());
        }
    }
}
