//! Deterministic prover pipeline.
//!
//! 1. Derive the public parameters and build the trace from the witness.
//! 2. Open the transcript on the public-instance digest and commit to the
//!    trace extension.
//! 3. Build the constraint quotients, draw three coefficients and combine
//!    them into the composition polynomial.
//! 4. Run the FRI commit phase on the composition polynomial.
//! 5. Draw and decommit `query_count` indices, replaying the verifier
//!    arithmetic on each when the self check is enabled.

use tracing::{debug, info};

use crate::air::{build_constraints, deduce_composition_value, Trace, TraceOpenings};
use crate::config::{ProverConfig, Witness};
use crate::field::FieldElement;
use crate::fri::{decommit_query, fri_commit, trace_values, FriCommitment, QueryDecommitment};
use crate::lde::LowDegreeExtension;
use crate::params::PublicParameters;
use crate::transcript::{Transcript, TranscriptLabel, COMPOSITION_ALPHAS};
use crate::{ProverError, ProverResult};

use super::types::Proof;

/// Everything a proof session produces.
#[derive(Debug, Clone)]
pub struct ProverOutput {
    /// Ordered transcript entries.
    pub proof: Proof,
    /// Terminal trace value the proof attests to.
    pub result: FieldElement,
    /// Composition coefficients drawn from the transcript.
    pub alphas: [FieldElement; 3],
    /// Structured copies of every query decommitment.
    pub queries: Vec<QueryDecommitment>,
}

/// Runs one complete proof session.
pub fn prove(config: &ProverConfig, witness: &Witness) -> ProverResult<ProverOutput> {
    let params = PublicParameters::derive(config)?;
    let trace = Trace::build(witness.secret, params.trace_length())?;
    let result = trace.result();
    if let Some(expected) = config.expected_result {
        if result.as_u64() != expected {
            return Err(ProverError::UnexpectedResult {
                expected,
                actual: result.as_u64(),
            });
        }
    }
    info!(
        trace_length = params.trace_length(),
        domain = params.domain_size(),
        %result,
        "starting proof session"
    );

    let mut transcript = Transcript::new(&config.instance_digest(&result));

    let lde = LowDegreeExtension::from_trace(&params, &trace)?;
    transcript.send(TranscriptLabel::TraceRoot, &lde.root_hex())?;

    let constraints = build_constraints(lde.polynomial(), &params, &result)?;
    let mut alphas = [FieldElement::ZERO; COMPOSITION_ALPHAS as usize];
    for (i, alpha) in (0..COMPOSITION_ALPHAS).zip(alphas.iter_mut()) {
        *alpha = transcript.derive_field_element(TranscriptLabel::CompositionAlpha(i))?;
    }
    let composition = constraints.combine(&alphas);
    info!(degree = ?composition.degree(), "composition polynomial built");

    let fri = fri_commit(composition, params.evaluation_domain().to_vec(), &mut transcript)?;

    let mut queries = Vec::with_capacity(config.query_count);
    for _ in 0..config.query_count {
        let index =
            transcript.derive_index(TranscriptLabel::QueryIndex, 0, config.max_query_index())?;
        let query = decommit_query(&lde, &fri, params.blowup_factor(), index, &mut transcript)?;
        if config.self_check {
            self_check(&params, &result, &alphas, &lde, &fri, &query)?;
        }
        info!(index, "query decommitted");
        queries.push(query);
    }

    let proof = transcript.into_proof();
    info!(entries = proof.len(), "proof session finished");
    Ok(ProverOutput {
        proof,
        result,
        alphas,
        queries,
    })
}

/// Recomputes `cp` at the queried point and its negation from trace values
/// and compares with the committed layer-0 evaluations.
fn self_check(
    params: &PublicParameters,
    result: &FieldElement,
    alphas: &[FieldElement; 3],
    lde: &LowDegreeExtension,
    fri: &FriCommitment,
    query: &QueryDecommitment,
) -> ProverResult<()> {
    let index = query.index;
    let failed = || ProverError::ConsistencyCheckFailed { index };
    let layer0 = fri.layers.first().ok_or_else(failed)?;
    let domain = params.evaluation_domain();
    let k = params.domain_size();
    let b = params.blowup_factor();

    let [f_x, f_gx, f_ggx] = trace_values(query);
    let at_x = deduce_composition_value(
        params,
        result,
        alphas,
        &domain[index],
        &TraceOpenings { f_x, f_gx, f_ggx },
    )?;
    let committed_x = query
        .layers
        .first()
        .map_or(layer0.evaluations()[index], |layer| layer.x.value);
    if at_x != committed_x {
        return Err(failed());
    }

    let mirrored = (index + k / 2) % k;
    let values = lde.evaluations();
    let at_neg_x = deduce_composition_value(
        params,
        result,
        alphas,
        &domain[mirrored],
        &TraceOpenings {
            f_x: values[mirrored],
            f_gx: values[(mirrored + b) % k],
            f_ggx: values[(mirrored + 2 * b) % k],
        },
    )?;
    let committed_neg_x = query
        .layers
        .first()
        .map_or(layer0.evaluations()[mirrored], |layer| layer.neg_x.value);
    if at_neg_x != committed_neg_x {
        return Err(failed());
    }

    debug!(index, mirrored, "self check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::AirError;
    use crate::config::ConfigError;
    use crate::field::FieldElementOps;

    fn small_config() -> ProverConfig {
        ProverConfig {
            trace_length: 15,
            subgroup_size: 16,
            blowup_factor: 8,
            query_count: 2,
            expected_result: None,
            self_check: true,
        }
    }

    #[test]
    fn small_session_produces_consistent_output() -> ProverResult<()> {
        let output = prove(&small_config(), &Witness::new(2))?;
        let trace = Trace::build(2, 15)?;
        assert_eq!(output.result, trace.result());
        assert_eq!(output.queries.len(), 2);
        // 1 root + 3 alphas + 1 root + 4 folds * 2 + 1 final, then 2 queries of 1 + 6 + 16 + 1.
        assert_eq!(output.proof.len(), 14 + 2 * 24);
        assert_eq!(output.proof.values("alpha_0").count(), 1);
        Ok(())
    }

    #[test]
    fn pinned_result_mismatch_is_rejected() {
        let config = ProverConfig {
            expected_result: Some(1),
            ..small_config()
        };
        let err = prove(&config, &Witness::new(2)).unwrap_err();
        assert!(matches!(
            err,
            ProverError::UnexpectedResult { expected: 1, .. }
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_proving() {
        let config = ProverConfig {
            query_count: 0,
            ..small_config()
        };
        assert_eq!(
            prove(&config, &Witness::new(2)).unwrap_err(),
            ProverError::Config(ConfigError::NoQueries)
        );
    }

    #[test]
    fn secret_outside_field_is_rejected() {
        let secret = FieldElement::MODULUS.value;
        assert_eq!(
            prove(&small_config(), &Witness::new(secret)).unwrap_err(),
            ProverError::Air(AirError::SecretOutOfField { secret })
        );
    }

    #[test]
    fn self_check_flags_tampered_layer_values() -> ProverResult<()> {
        let config = small_config();
        let params = PublicParameters::derive(&config)?;
        let output = prove(&config, &Witness::new(2))?;
        let trace = Trace::build(2, 15)?;
        let lde = LowDegreeExtension::from_trace(&params, &trace)?;
        let mut transcript = Transcript::new(&config.instance_digest(&output.result));
        transcript.send(TranscriptLabel::TraceRoot, &lde.root_hex())?;
        let constraints = build_constraints(lde.polynomial(), &params, &output.result)?;
        for i in 0..COMPOSITION_ALPHAS {
            transcript.derive_field_element(TranscriptLabel::CompositionAlpha(i))?;
        }
        let fri = fri_commit(
            constraints.combine(&output.alphas),
            params.evaluation_domain().to_vec(),
            &mut transcript,
        )?;

        let mut query = output.queries[0].clone();
        self_check(&params, &output.result, &output.alphas, &lde, &fri, &query)?;
        query.layers[0].x.value = query.layers[0].x.value.add(&FieldElement::ONE);
        let err = self_check(&params, &output.result, &output.alphas, &lde, &fri, &query)
            .unwrap_err();
        assert_eq!(
            err,
            ProverError::ConsistencyCheckFailed { index: query.index }
        );
        Ok(())
    }
}
