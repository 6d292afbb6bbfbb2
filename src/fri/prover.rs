use tracing::{debug, info};

use crate::field::{FieldElement, Polynomial};
use crate::transcript::{Transcript, TranscriptLabel};

use super::folding::fold_count;
use super::layer::FriLayer;
use super::query::layer_tag;
use super::types::{FriCommitment, FriError};

/// Phases of the commit loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPhase {
    /// Commit the composition evaluations as layer 0.
    Init,
    /// Draw `beta_i`, fold and commit layer `i + 1` until the polynomial is constant.
    Folding,
    /// Send the final constant.
    Done,
}

/// Runs the FRI commit phase for `composition` over `domain`.
///
/// Sends the layer-0 root, then one `(beta_i, root_{i+1})` pair per fold and
/// finally the constant the last layer collapsed to.
pub fn fri_commit(
    composition: Polynomial,
    domain: Vec<FieldElement>,
    transcript: &mut Transcript,
) -> Result<FriCommitment, FriError> {
    if domain.is_empty() {
        return Err(FriError::EmptyDomain);
    }
    let expected_folds = check_fold_budget(&composition, domain.len())?;

    let mut phase = CommitPhase::Init;
    let mut layers: Vec<FriLayer> = Vec::new();
    let mut fold_challenges = Vec::new();

    loop {
        match phase {
            CommitPhase::Init => {
                let layer = FriLayer::commit(0, composition.clone(), domain.clone());
                transcript.send(TranscriptLabel::CompositionRoot, &layer.root_hex())?;
                debug!(
                    layer = 0,
                    degree = ?layer.polynomial().degree(),
                    length = layer.len(),
                    "fri layer committed"
                );
                layers.push(layer);
                phase = CommitPhase::Folding;
            }
            CommitPhase::Folding => {
                let current = &layers[layers.len() - 1];
                let degree = match current.polynomial().degree() {
                    Some(degree) if degree > 0 => degree,
                    _ => {
                        phase = CommitPhase::Done;
                        continue;
                    }
                };
                if current.len() <= 1 {
                    return Err(FriError::MalformedComposition {
                        layer: current.index(),
                        degree,
                    });
                }
                let round = layer_tag(current.index())?;

                let beta = transcript.derive_field_element(TranscriptLabel::FriFoldChallenge(round))?;
                let next = current.fold(&beta);
                transcript.send(TranscriptLabel::FriLayerRoot(round + 1), &next.root_hex())?;
                debug!(
                    layer = next.index(),
                    degree = ?next.polynomial().degree(),
                    length = next.len(),
                    "fri layer committed"
                );
                fold_challenges.push(beta);
                layers.push(next);
            }
            CommitPhase::Done => {
                let final_constant = layers[layers.len() - 1].polynomial().coefficient(0);
                transcript.send(TranscriptLabel::FriFinalConstant, &final_constant)?;
                info!(
                    folds = fold_challenges.len(),
                    expected_folds,
                    final_length = layers[layers.len() - 1].len(),
                    "fri commit finished"
                );
                return Ok(FriCommitment {
                    layers,
                    fold_challenges,
                    final_constant,
                });
            }
        }
    }
}

/// Checks that a domain of `length` points can absorb every fold `composition` needs.
///
/// Layer `j` has `length >> j` points and degree at most `deg >> j`; folding
/// layer `j` needs at least two points.  Runs before any transcript write.
fn check_fold_budget(composition: &Polynomial, length: usize) -> Result<usize, FriError> {
    let degree = composition.degree().unwrap_or(0);
    let folds = fold_count(degree);
    layer_tag(folds)?;
    let available = (usize::BITS - 1 - length.leading_zeros()) as usize;
    if folds > available {
        return Err(FriError::MalformedComposition {
            layer: available,
            degree: degree >> available,
        });
    }
    Ok(folds)
}
