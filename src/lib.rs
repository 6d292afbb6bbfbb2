//! Core library entry point for the `fibsq-stark` prover.
//!
//! The crate proves knowledge of a secret `s` such that the sequence
//! `t[0] = 1, t[1] = s, t[i+2] = t[i+1]^2 + t[i]^2` over `F_p`,
//! `p = 3 * 2^30 + 1`, reaches a public terminal value.  [`prove`] runs the
//! whole pipeline and returns the ordered transcript as a [`Proof`].

use core::fmt;

pub mod air;
pub mod commitment;
pub mod config;
pub mod field;
pub mod fri;
pub mod hash;
pub mod lde;
pub mod logging;
pub mod merkle;
pub mod params;
pub mod proof;
pub mod transcript;
pub mod utils;

pub use air::{build_constraints, AirError, Trace};
pub use config::{ConfigError, ProverConfig, Witness, PROFILE_FIBSQ_1023};
pub use field::{FieldElement, Polynomial, PolynomialError};
pub use fri::{decommit_query, fri_commit, FriCommitment, FriError, QueryDecommitment};
pub use lde::LowDegreeExtension;
pub use merkle::MerkleError;
pub use params::PublicParameters;
pub use proof::{prove, Proof, ProofEntry, ProverOutput};
pub use transcript::{Transcript, TranscriptError, TranscriptLabel};

/// Result type used throughout the library to surface deterministic errors.
pub type ProverResult<T> = core::result::Result<T, ProverError>;

/// Error enumeration for a proof session.  Every variant is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Trace or constraint construction failed.
    Air(AirError),
    /// Polynomial arithmetic failed.
    Polynomial(PolynomialError),
    /// FRI commit or decommit failed.
    Fri(FriError),
    /// The transcript rejected an entry.
    Transcript(TranscriptError),
    /// Recomputed composition values disagree with the committed layer at this query.
    ConsistencyCheckFailed {
        /// Query index.
        index: usize,
    },
    /// The trace reached a different terminal value than the configured one.
    UnexpectedResult {
        /// Configured value.
        expected: u64,
        /// Value the trace reached.
        actual: u64,
    },
}

impl fmt::Display for ProverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProverError::Config(err) => write!(f, "configuration error: {err}"),
            ProverError::Air(err) => write!(f, "air error: {err}"),
            ProverError::Polynomial(err) => write!(f, "polynomial error: {err}"),
            ProverError::Fri(err) => write!(f, "fri error: {err}"),
            ProverError::Transcript(err) => write!(f, "transcript error: {err}"),
            ProverError::ConsistencyCheckFailed { index } => {
                write!(f, "self check failed at query index {index}")
            }
            ProverError::UnexpectedResult { expected, actual } => write!(
                f,
                "trace reached {actual} but the configuration expects {expected}"
            ),
        }
    }
}

impl std::error::Error for ProverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProverError::Config(err) => Some(err),
            ProverError::Air(err) => Some(err),
            ProverError::Polynomial(err) => Some(err),
            ProverError::Fri(err) => Some(err),
            ProverError::Transcript(err) => Some(err),
            ProverError::ConsistencyCheckFailed { .. } | ProverError::UnexpectedResult { .. } => {
                None
            }
        }
    }
}

impl From<ConfigError> for ProverError {
    fn from(err: ConfigError) -> Self {
        ProverError::Config(err)
    }
}

impl From<AirError> for ProverError {
    fn from(err: AirError) -> Self {
        ProverError::Air(err)
    }
}

impl From<PolynomialError> for ProverError {
    fn from(err: PolynomialError) -> Self {
        ProverError::Polynomial(err)
    }
}

impl From<FriError> for ProverError {
    fn from(err: FriError) -> Self {
        ProverError::Fri(err)
    }
}

impl From<TranscriptError> for ProverError {
    fn from(err: TranscriptError) -> Self {
        ProverError::Transcript(err)
    }
}
