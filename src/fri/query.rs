//! Per-query decommitment.

use tracing::debug;

use crate::field::FieldElement;
use crate::lde::LowDegreeExtension;
use crate::transcript::{LayerSide, TraceOffset, Transcript, TranscriptLabel};

use super::types::{FriCommitment, FriError, LayerOpenings, Opening, QueryDecommitment};

/// Reveals the trace at `x, g x, g^2 x` and every non-final layer at `x, -x`.
///
/// `index` addresses the evaluation domain; the trace openings sit at
/// `index`, `index + b` and `index + 2b` where `b` is `blowup_factor`.  The
/// range check runs before the first transcript write, so a rejected query
/// leaves the transcript untouched.
pub fn decommit_query(
    lde: &LowDegreeExtension,
    fri: &FriCommitment,
    blowup_factor: usize,
    index: usize,
    transcript: &mut Transcript,
) -> Result<QueryDecommitment, FriError> {
    let length = lde.len();
    let last_offset = index
        .checked_add(2 * blowup_factor)
        .ok_or(FriError::QueryIndexOutOfRange { index, length })?;
    if last_offset >= length {
        return Err(FriError::QueryIndexOutOfRange { index, length });
    }

    let trace = open_trace(lde, blowup_factor, index)?;
    let layers = fri
        .opened_layers()
        .iter()
        .map(|layer| {
            let len = layer.len();
            Ok(LayerOpenings {
                layer: layer.index(),
                x: layer.open(index % len)?,
                neg_x: layer.open((index + len / 2) % len)?,
            })
        })
        .collect::<Result<Vec<_>, FriError>>()?;

    for (offset, opening) in TraceOffset::ALL.iter().zip(&trace) {
        transcript.send(TranscriptLabel::TraceValue(*offset), &opening.value)?;
        transcript.send(TranscriptLabel::TracePath(*offset), &opening.path)?;
    }
    for openings in &layers {
        let layer = layer_tag(openings.layer)?;
        for (side, opening) in [(LayerSide::X, &openings.x), (LayerSide::NegX, &openings.neg_x)] {
            transcript.send(TranscriptLabel::LayerValue { layer, side }, &opening.value)?;
            transcript.send(TranscriptLabel::LayerPath { layer, side }, &opening.path)?;
        }
    }
    transcript.send(TranscriptLabel::QueryFinalConstant, &fri.final_constant)?;

    debug!(index, layers = layers.len(), "query decommitted");
    Ok(QueryDecommitment {
        index,
        trace,
        layers,
        final_constant: fri.final_constant,
    })
}

fn open_trace(
    lde: &LowDegreeExtension,
    blowup_factor: usize,
    index: usize,
) -> Result<[Opening; 3], FriError> {
    let open = |steps: usize| -> Result<Opening, FriError> {
        let position = index + steps * blowup_factor;
        let (value, path) = lde.open(position)?;
        Ok(Opening {
            index: position,
            value,
            path,
        })
    };
    Ok([
        open(TraceOffset::X.steps())?,
        open(TraceOffset::Gx.steps())?,
        open(TraceOffset::Ggx.steps())?,
    ])
}

pub(crate) fn layer_tag(layer: usize) -> Result<u8, FriError> {
    u8::try_from(layer).map_err(|_| FriError::LayerIndexOverflow { layer })
}

/// Trace values revealed by a decommitment, in `x, g x, g^2 x` order.
pub fn trace_values(query: &QueryDecommitment) -> [FieldElement; 3] {
    [
        query.trace[0].value,
        query.trace[1].value,
        query.trace[2].value,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::{build_constraints, Trace};
    use crate::config::ProverConfig;
    use crate::field::FieldElementOps;
    use crate::fri::fri_commit;
    use crate::hash::{hash, Hash};
    use crate::params::PublicParameters;
    use crate::transcript::COMPOSITION_ALPHAS;

    struct Session {
        lde: LowDegreeExtension,
        fri: FriCommitment,
        transcript: Transcript,
        blowup: usize,
    }

    fn session() -> Session {
        let config = ProverConfig {
            trace_length: 15,
            subgroup_size: 16,
            blowup_factor: 8,
            query_count: 1,
            expected_result: None,
            self_check: true,
        };
        let params = PublicParameters::derive(&config).expect("valid config");
        let trace = Trace::build(7, config.trace_length).expect("valid trace");
        let lde = LowDegreeExtension::from_trace(&params, &trace).expect("interpolation");

        let mut transcript = Transcript::new(&hash(b"fri-query-tests"));
        transcript
            .send(TranscriptLabel::TraceRoot, &lde.root_hex())
            .expect("trace root");
        let constraints =
            build_constraints(lde.polynomial(), &params, &trace.result()).expect("constraints");
        let mut alphas = [FieldElement::ZERO; 3];
        for (i, alpha) in alphas.iter_mut().enumerate() {
            *alpha = transcript
                .derive_field_element(TranscriptLabel::CompositionAlpha(i as u8))
                .expect("alpha");
        }
        assert_eq!(alphas.len(), COMPOSITION_ALPHAS as usize);
        let cp = constraints.combine(&alphas);
        let fri = fri_commit(cp, params.evaluation_domain().to_vec(), &mut transcript)
            .expect("fri commit");
        Session {
            lde,
            fri,
            transcript,
            blowup: config.blowup_factor,
        }
    }

    #[test]
    fn out_of_range_index_writes_nothing() {
        let mut s = session();
        let before = s.transcript.entries().len();
        let state = s.transcript.state_digest();
        let k = s.lde.len();
        for index in [k - 2 * s.blowup, k - 1, k + 5, usize::MAX] {
            let err = decommit_query(&s.lde, &s.fri, s.blowup, index, &mut s.transcript)
                .unwrap_err();
            assert_eq!(err, FriError::QueryIndexOutOfRange { index, length: k });
        }
        assert_eq!(s.transcript.entries().len(), before);
        assert_eq!(s.transcript.state_digest(), state);
    }

    #[test]
    fn openings_verify_against_committed_roots() -> Result<(), FriError> {
        let mut s = session();
        let max = s.lde.len() - 1 - 2 * s.blowup;
        let index = s.transcript.derive_index(TranscriptLabel::QueryIndex, 0, max)?;
        let before = s.transcript.entries().len();
        let query = decommit_query(&s.lde, &s.fri, s.blowup, index, &mut s.transcript)?;

        let trace_root = Hash::from_bytes(s.lde.root());
        for (steps, opening) in query.trace.iter().enumerate() {
            assert_eq!(opening.index, index + steps * s.blowup);
            opening.verify(&trace_root, s.lde.len())?;
        }
        assert_eq!(query.layers.len(), s.fri.num_folds());
        for (openings, layer) in query.layers.iter().zip(s.fri.opened_layers()) {
            let root = Hash::from_bytes(layer.root());
            openings.x.verify(&root, layer.len())?;
            openings.neg_x.verify(&root, layer.len())?;
            assert_eq!(
                layer.domain()[openings.neg_x.index],
                layer.domain()[openings.x.index].neg()
            );
        }
        assert_eq!(
            s.transcript.entries().len() - before,
            6 + 4 * s.fri.num_folds() + 1
        );
        Ok(())
    }

    #[test]
    fn layer_tags_fit_one_byte() {
        assert_eq!(layer_tag(0), Ok(0));
        assert_eq!(layer_tag(255), Ok(255));
        assert_eq!(
            layer_tag(256),
            Err(FriError::LayerIndexOverflow { layer: 256 })
        );
        assert_eq!(
            FriError::LayerIndexOverflow { layer: 256 }.to_string(),
            "layer index 256 exceeds the transcript label range"
        );
    }

    #[test]
    fn decommit_without_query_index_is_rejected() {
        let mut s = session();
        let err = decommit_query(&s.lde, &s.fri, s.blowup, 0, &mut s.transcript).unwrap_err();
        assert!(matches!(err, FriError::Transcript(_)));
    }
}
