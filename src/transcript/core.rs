use core::fmt;

use crate::field::FieldElement;
use crate::hash::{hash, Blake2sXof, Hash, Hasher};
use crate::proof::{Proof, ProofEntry};

use super::types::{LayerSide, TraceOffset, TranscriptError, TranscriptLabel, TranscriptPhase};

/// Number of random coefficients combined into the composition polynomial.
pub const COMPOSITION_ALPHAS: u8 = crate::air::CONSTRAINT_COUNT as u8;

const TRANSCRIPT_VERSION: &[u8] = b"FIBSQ-TRANSCRIPT-V1";
const TRACE_ENTRIES_PER_QUERY: usize = 2 * TraceOffset::ALL.len();
const LAYER_ENTRIES_PER_QUERY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TraceRoot,
    Alpha { next: u8 },
    CompositionRoot,
    /// Layer `layer` is committed; fold it or close the commit phase.
    FoldOrFinal { layer: u8 },
    LayerRoot { layer: u8 },
    /// `cursor` counts entries of the query in progress.
    Queries { folds: u8, cursor: usize },
}

#[derive(Debug, Clone)]
struct PhaseTracker {
    stage: Stage,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            stage: Stage::TraceRoot,
        }
    }

    fn phase(&self) -> TranscriptPhase {
        match self.stage {
            Stage::TraceRoot => TranscriptPhase::TraceCommit,
            Stage::Alpha { .. } | Stage::CompositionRoot => TranscriptPhase::Composition,
            Stage::FoldOrFinal { .. } | Stage::LayerRoot { .. } => TranscriptPhase::Fri,
            Stage::Queries { .. } => TranscriptPhase::Queries,
        }
    }

    fn apply(&mut self, label: TranscriptLabel) -> Result<(), TranscriptError> {
        let next = match (self.stage, label) {
            (Stage::TraceRoot, TranscriptLabel::TraceRoot) => Some(Stage::Alpha { next: 0 }),
            (Stage::Alpha { next }, TranscriptLabel::CompositionAlpha(i)) if i == next => {
                if next + 1 == COMPOSITION_ALPHAS {
                    Some(Stage::CompositionRoot)
                } else {
                    Some(Stage::Alpha { next: next + 1 })
                }
            }
            (Stage::CompositionRoot, TranscriptLabel::CompositionRoot) => {
                Some(Stage::FoldOrFinal { layer: 0 })
            }
            (Stage::FoldOrFinal { layer }, TranscriptLabel::FriFoldChallenge(i)) if i == layer => {
                layer
                    .checked_add(1)
                    .map(|layer| Stage::LayerRoot { layer })
            }
            (Stage::FoldOrFinal { layer }, TranscriptLabel::FriFinalConstant) => {
                Some(Stage::Queries {
                    folds: layer,
                    cursor: 0,
                })
            }
            (Stage::LayerRoot { layer }, TranscriptLabel::FriLayerRoot(i)) if i == layer => {
                Some(Stage::FoldOrFinal { layer })
            }
            (Stage::Queries { folds, cursor }, label)
                if query_label(folds, cursor) == Some(label) =>
            {
                let cursor = (cursor + 1) % query_entries(folds);
                Some(Stage::Queries { folds, cursor })
            }
            _ => None,
        };

        match next {
            Some(stage) => {
                self.stage = stage;
                Ok(())
            }
            None => Err(TranscriptError::InvalidLabel {
                label,
                phase: self.phase(),
            }),
        }
    }
}

/// Number of transcript entries produced by one query against `folds` non-final layers.
pub fn query_entries(folds: u8) -> usize {
    1 + TRACE_ENTRIES_PER_QUERY + LAYER_ENTRIES_PER_QUERY * folds as usize + 1
}

fn query_label(folds: u8, cursor: usize) -> Option<TranscriptLabel> {
    let layers_end = 1 + TRACE_ENTRIES_PER_QUERY + LAYER_ENTRIES_PER_QUERY * folds as usize;
    match cursor {
        0 => Some(TranscriptLabel::QueryIndex),
        c if c <= TRACE_ENTRIES_PER_QUERY => {
            let offset = TraceOffset::ALL[(c - 1) / 2];
            if (c - 1) % 2 == 0 {
                Some(TranscriptLabel::TraceValue(offset))
            } else {
                Some(TranscriptLabel::TracePath(offset))
            }
        }
        c if c < layers_end => {
            let position = c - 1 - TRACE_ENTRIES_PER_QUERY;
            let layer = (position / LAYER_ENTRIES_PER_QUERY) as u8;
            let side = if position % LAYER_ENTRIES_PER_QUERY < 2 {
                LayerSide::X
            } else {
                LayerSide::NegX
            };
            if position % 2 == 0 {
                Some(TranscriptLabel::LayerValue { layer, side })
            } else {
                Some(TranscriptLabel::LayerPath { layer, side })
            }
        }
        c if c == layers_end => Some(TranscriptLabel::QueryFinalConstant),
        _ => None,
    }
}

/// Fiat–Shamir transcript recording every sent and derived value.
///
/// The running state is `H(state || tag(label) || len || value)` after every
/// entry, so each challenge depends on the complete history before it.
#[derive(Debug, Clone)]
pub struct Transcript {
    state: [u8; 32],
    challenge_counter: u64,
    tracker: PhaseTracker,
    entries: Vec<ProofEntry>,
}

impl Transcript {
    /// Opens a transcript bound to the public-instance digest `seed`.
    pub fn new(seed: &Hash) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(TRANSCRIPT_VERSION).update(seed.as_bytes());
        Self {
            state: hasher.finalize().into_bytes(),
            challenge_counter: 0,
            tracker: PhaseTracker::new(),
            entries: Vec::new(),
        }
    }

    /// Appends `value` under `label`.
    pub fn send<V: fmt::Display + ?Sized>(
        &mut self,
        label: TranscriptLabel,
        value: &V,
    ) -> Result<(), TranscriptError> {
        if label.is_challenge() {
            return Err(TranscriptError::InvalidLabel {
                label,
                phase: self.phase(),
            });
        }
        self.tracker.apply(label)?;
        self.record(label, value.to_string());
        Ok(())
    }

    /// Derives a field element and records it.
    pub fn derive_field_element(
        &mut self,
        label: TranscriptLabel,
    ) -> Result<FieldElement, TranscriptError> {
        let mut bytes = [0u8; 32];
        self.derive_challenge(label, &mut bytes)?;
        let value = FieldElement::from_transcript_bytes(&bytes);
        self.record(label, value.to_string());
        Ok(value)
    }

    /// Derives an index in the inclusive range `[low, high]` and records it.
    pub fn derive_index(
        &mut self,
        label: TranscriptLabel,
        low: usize,
        high: usize,
    ) -> Result<usize, TranscriptError> {
        let (low, high) = (low as u64, high as u64);
        if low > high {
            return Err(TranscriptError::EmptyRange { low, high });
        }
        let span = (high - low)
            .checked_add(1)
            .ok_or(TranscriptError::Overflow)?;
        let mut bytes = [0u8; 8];
        self.derive_challenge(label, &mut bytes)?;
        let value = low + u64::from_le_bytes(bytes) % span;
        self.record(label, value.to_string());
        Ok(value as usize)
    }

    fn derive_challenge(
        &mut self,
        label: TranscriptLabel,
        output: &mut [u8],
    ) -> Result<(), TranscriptError> {
        if !label.is_challenge() {
            return Err(TranscriptError::InvalidLabel {
                label,
                phase: self.phase(),
            });
        }
        let counter = self
            .challenge_counter
            .checked_add(1)
            .ok_or(TranscriptError::Overflow)?;
        self.tracker.apply(label)?;
        self.challenge_counter = counter;

        let mut seed = Vec::with_capacity(32 + 16 + 8);
        seed.extend_from_slice(&self.state);
        seed.extend_from_slice(&label.domain_tag());
        seed.extend_from_slice(&self.challenge_counter.to_le_bytes());
        Blake2sXof::new(&seed).squeeze(output);
        Ok(())
    }

    fn record(&mut self, label: TranscriptLabel, value: String) {
        self.state = mix(self.state, label, value.as_bytes());
        self.entries.push(ProofEntry::new(label.name(), value));
    }

    /// Current 32-byte state digest.
    pub fn state_digest(&self) -> [u8; 32] {
        self.state
    }

    /// Current phase.
    pub fn phase(&self) -> TranscriptPhase {
        self.tracker.phase()
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> &[ProofEntry] {
        &self.entries
    }

    /// Finalises the transcript into a proof.
    pub fn into_proof(self) -> Proof {
        Proof::new(self.entries)
    }
}

fn mix(state: [u8; 32], label: TranscriptLabel, data: &[u8]) -> [u8; 32] {
    let mut payload = Vec::with_capacity(32 + 16 + 8 + data.len());
    payload.extend_from_slice(&state);
    payload.extend_from_slice(&label.domain_tag());
    payload.extend_from_slice(&(data.len() as u64).to_le_bytes());
    payload.extend_from_slice(data);
    hash(&payload).into_bytes()
}
