use core::fmt;

/// Which trace evaluation a decommitment entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceOffset {
    /// `f(x)`.
    X,
    /// `f(g x)`.
    Gx,
    /// `f(g^2 x)`.
    Ggx,
}

impl TraceOffset {
    /// All offsets in transcript order.
    pub const ALL: [TraceOffset; 3] = [TraceOffset::X, TraceOffset::Gx, TraceOffset::Ggx];

    /// Number of trace-subgroup steps the offset represents.
    pub const fn steps(self) -> usize {
        match self {
            TraceOffset::X => 0,
            TraceOffset::Gx => 1,
            TraceOffset::Ggx => 2,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            TraceOffset::X => "x",
            TraceOffset::Gx => "gx",
            TraceOffset::Ggx => "ggx",
        }
    }
}

/// Which point of a FRI layer pair a decommitment entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSide {
    /// The queried point `x`.
    X,
    /// Its negation `-x`, half a layer away.
    NegX,
}

impl LayerSide {
    fn suffix(self) -> &'static str {
        match self {
            LayerSide::X => "x",
            LayerSide::NegX => "neg_x",
        }
    }
}

/// Canonical transcript labels.
///
/// Every label has a human-readable name stored in the proof and a 16-byte
/// domain tag mixed into the transcript state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptLabel {
    /// Merkle root of the trace low-degree extension.
    TraceRoot,
    /// Random coefficient `alpha_i` of the composition polynomial.
    CompositionAlpha(u8),
    /// Merkle root of the composition polynomial evaluations (FRI layer 0).
    CompositionRoot,
    /// Folding challenge turning layer `i` into layer `i + 1`.
    FriFoldChallenge(u8),
    /// Merkle root of FRI layer `i` (`i >= 1`).
    FriLayerRoot(u8),
    /// Constant value of the last FRI layer.
    FriFinalConstant,
    /// Query index drawn from the transcript.
    QueryIndex,
    /// Revealed trace evaluation.
    TraceValue(TraceOffset),
    /// Authentication path of a revealed trace evaluation.
    TracePath(TraceOffset),
    /// Revealed evaluation of a FRI layer.
    LayerValue {
        /// Layer index.
        layer: u8,
        /// Queried point or its negation.
        side: LayerSide,
    },
    /// Authentication path of a revealed FRI layer evaluation.
    LayerPath {
        /// Layer index.
        layer: u8,
        /// Queried point or its negation.
        side: LayerSide,
    },
    /// Constant of the last FRI layer, repeated for each query.
    QueryFinalConstant,
}

const fn tag(code: &[u8; 13], a: u8, b: u8) -> [u8; 16] {
    let mut out = [0u8; 16];
    let mut i = 0;
    while i < code.len() {
        out[i] = code[i];
        i += 1;
    }
    out[13] = a;
    out[14] = b;
    out
}

impl TranscriptLabel {
    /// Whether the label names a value derived from the transcript rather than sent into it.
    pub fn is_challenge(self) -> bool {
        matches!(
            self,
            TranscriptLabel::CompositionAlpha(_)
                | TranscriptLabel::FriFoldChallenge(_)
                | TranscriptLabel::QueryIndex
        )
    }

    /// Label string recorded in the proof.
    pub fn name(self) -> String {
        match self {
            TranscriptLabel::TraceRoot => "commit_f_merkle".to_owned(),
            TranscriptLabel::CompositionAlpha(i) => format!("alpha_{i}"),
            TranscriptLabel::CompositionRoot => "commit_cp_merkle".to_owned(),
            TranscriptLabel::FriFoldChallenge(i) => format!("fri_beta_{i}"),
            TranscriptLabel::FriLayerRoot(i) => format!("commit_fri_merkle_{i}"),
            TranscriptLabel::FriFinalConstant => "commit_cp_final".to_owned(),
            TranscriptLabel::QueryIndex => "query_index".to_owned(),
            TranscriptLabel::TraceValue(offset) => format!("decommit_f_{}", offset.suffix()),
            TranscriptLabel::TracePath(offset) => {
                format!("decommit_f_{}_auth_path", offset.suffix())
            }
            TranscriptLabel::LayerValue { layer, side } => {
                format!("decommit_layer_{layer}_{}", side.suffix())
            }
            TranscriptLabel::LayerPath { layer, side } => {
                format!("decommit_layer_{layer}_{}_auth_path", side.suffix())
            }
            TranscriptLabel::QueryFinalConstant => "decommit_cp_final".to_owned(),
        }
    }

    pub(crate) fn domain_tag(self) -> [u8; 16] {
        match self {
            TranscriptLabel::TraceRoot => tag(b"FSQ_TRACEROOT", 0, 0),
            TranscriptLabel::CompositionAlpha(i) => tag(b"FSQ_CP_ALPHA_", i, 0),
            TranscriptLabel::CompositionRoot => tag(b"FSQ_CP_ROOT__", 0, 0),
            TranscriptLabel::FriFoldChallenge(i) => tag(b"FSQ_FRI_BETA_", i, 0),
            TranscriptLabel::FriLayerRoot(i) => tag(b"FSQ_FRI_ROOT_", i, 0),
            TranscriptLabel::FriFinalConstant => tag(b"FSQ_FRI_FINAL", 0, 0),
            TranscriptLabel::QueryIndex => tag(b"FSQ_QUERY_IDX", 0, 0),
            TranscriptLabel::TraceValue(offset) => tag(b"FSQ_DC_TRACE_", offset.steps() as u8, 0),
            TranscriptLabel::TracePath(offset) => tag(b"FSQ_DC_TRPATH", offset.steps() as u8, 0),
            TranscriptLabel::LayerValue { layer, side } => {
                tag(b"FSQ_DC_LAYER_", layer, side as u8)
            }
            TranscriptLabel::LayerPath { layer, side } => tag(b"FSQ_DC_LYPATH", layer, side as u8),
            TranscriptLabel::QueryFinalConstant => tag(b"FSQ_DC_FINAL_", 0, 0),
        }
    }
}

impl fmt::Display for TranscriptLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Coarse transcript phases exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptPhase {
    /// Waiting for the trace commitment.
    TraceCommit,
    /// Drawing the composition coefficients and committing the composition polynomial.
    Composition,
    /// FRI fold-and-commit loop.
    Fri,
    /// Query sampling and decommitment.
    Queries,
}

impl fmt::Display for TranscriptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TranscriptPhase::TraceCommit => "trace commit",
            TranscriptPhase::Composition => "composition",
            TranscriptPhase::Fri => "fri",
            TranscriptPhase::Queries => "queries",
        };
        f.write_str(name)
    }
}

/// Error type returned by the transcript API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// Label was used outside of the canonical order.
    InvalidLabel {
        /// Offending label.
        label: TranscriptLabel,
        /// Phase the transcript was in.
        phase: TranscriptPhase,
    },
    /// `derive_index` was called with `low > high`.
    EmptyRange {
        /// Inclusive lower bound.
        low: u64,
        /// Inclusive upper bound.
        high: u64,
    },
    /// Internal counter overflowed.
    Overflow,
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::InvalidLabel { label, phase } => {
                write!(f, "label {label} used out of order during {phase} phase")
            }
            TranscriptError::EmptyRange { low, high } => {
                write!(f, "index range [{low}, {high}] is empty")
            }
            TranscriptError::Overflow => write!(f, "internal counter overflow"),
        }
    }
}

impl std::error::Error for TranscriptError {}
