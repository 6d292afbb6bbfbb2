//! Execution trace of the Fibonacci-squared sequence.

use crate::config::MIN_TRACE_LENGTH;
use crate::field::{FieldElement, FieldElementOps};

use super::errors::AirError;

/// Immutable trace `t[0..L]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    values: Vec<FieldElement>,
}

impl Trace {
    /// Runs the recurrence `t[i] = t[i-2]^2 + t[i-1]^2` from `(1, secret)`.
    pub fn build(secret: u64, length: usize) -> Result<Self, AirError> {
        let secret = FieldElement::from_canonical(secret)
            .ok_or(AirError::SecretOutOfField { secret })?;
        if length < MIN_TRACE_LENGTH {
            return Err(AirError::TraceTooShort {
                min: MIN_TRACE_LENGTH,
                got: length,
            });
        }

        let mut values = Vec::with_capacity(length);
        values.push(FieldElement::ONE);
        values.push(secret);
        for i in 2..length {
            let next = values[i - 2].square().add(&values[i - 1].square());
            values.push(next);
        }
        Ok(Self { values })
    }

    /// Trace values in row order.
    pub fn values(&self) -> &[FieldElement] {
        &self.values
    }

    /// Number of rows `L`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a built trace has at least four rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Public terminal value `t[L-1]`.
    pub fn result(&self) -> FieldElement {
        self.values[self.values.len() - 1]
    }
}
