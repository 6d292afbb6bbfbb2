use crate::config::{ConfigError, ProverConfig};
use crate::field::{FieldElement, FieldElementOps};

/// Generators and domains shared by every stage of the prover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicParameters {
    trace_length: usize,
    blowup_factor: usize,
    trace_generator: FieldElement,
    subgroup: Vec<FieldElement>,
    coset_offset: FieldElement,
    coset_generator: FieldElement,
    evaluation_domain: Vec<FieldElement>,
}

impl PublicParameters {
    /// Validates `config` and derives the generators and domains.
    pub fn derive(config: &ProverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let order = FieldElement::group_order();
        let n = config.subgroup_size;
        let k = config.domain_size();

        let trace_generator = FieldElement::GENERATOR.pow(order / n as u64);
        let coset_offset = FieldElement::GENERATOR;
        let coset_generator = FieldElement::GENERATOR.pow(order / k as u64);

        Ok(Self {
            trace_length: config.trace_length,
            blowup_factor: config.blowup_factor,
            trace_generator,
            subgroup: powers(&FieldElement::ONE, &trace_generator, n),
            coset_offset,
            coset_generator,
            evaluation_domain: powers(&coset_offset, &coset_generator, k),
        })
    }

    /// Trace generator `g`.
    pub fn trace_generator(&self) -> FieldElement {
        self.trace_generator
    }

    /// Subgroup `G = [g^0, .., g^(n-1)]`.
    pub fn subgroup(&self) -> &[FieldElement] {
        &self.subgroup
    }

    /// Interpolation points `g^0 .. g^(L-1)`.
    pub fn trace_points(&self) -> &[FieldElement] {
        &self.subgroup[..self.trace_length]
    }

    /// Number of trace rows `L`.
    pub fn trace_length(&self) -> usize {
        self.trace_length
    }

    /// Subgroup size `n`.
    pub fn subgroup_size(&self) -> usize {
        self.subgroup.len()
    }

    /// Blowup factor.
    pub fn blowup_factor(&self) -> usize {
        self.blowup_factor
    }

    /// Coset offset `w`.
    pub fn coset_offset(&self) -> FieldElement {
        self.coset_offset
    }

    /// Generator `h` of the order-`k` subgroup.
    pub fn coset_generator(&self) -> FieldElement {
        self.coset_generator
    }

    /// Evaluation domain `[w * h^i]`.
    pub fn evaluation_domain(&self) -> &[FieldElement] {
        &self.evaluation_domain
    }

    /// Evaluation domain size `k`.
    pub fn domain_size(&self) -> usize {
        self.evaluation_domain.len()
    }
}

fn powers(start: &FieldElement, step: &FieldElement, count: usize) -> Vec<FieldElement> {
    let mut out = Vec::with_capacity(count);
    let mut current = *start;
    for _ in 0..count {
        out.push(current);
        current = current.mul(step);
    }
    out
}
