//! Field arithmetic primitives for the Fibonacci-squared prover.
//! Contains the prime field implementation and dense polynomial utilities.

pub mod polynomial;
pub mod prime_field;

pub use polynomial::{interpolate, Polynomial, PolynomialError};
pub use prime_field::{FieldElement, FieldElementOps};
