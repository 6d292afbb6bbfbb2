//! Prover configuration profiles.
//!
//! A [`ProverConfig`] fixes every public dimension of a proof session: trace
//! length, trace subgroup size, blowup factor and number of queries.  The
//! secret start value is carried separately by [`Witness`] and never enters
//! [`ProverConfig::instance_digest`].

use core::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::hash::{Hash, ParameterDigest};

/// Domain separator absorbed first into every instance digest.
pub const INSTANCE_DIGEST_DOMAIN_TAG: &[u8] = b"FIBSQ-INSTANCE-V1";

/// Smallest trace the transition constraint can be stated over.
pub const MIN_TRACE_LENGTH: usize = 4;

/// Smallest blowup that leaves room for the `-x` sibling of every query.
pub const MIN_BLOWUP_FACTOR: usize = 2;

/// Canonical Fibonacci-squared profile: 1023 steps, subgroup of 1024, blowup 8, 3 queries.
pub const PROFILE_FIBSQ_1023: ProverConfig = ProverConfig {
    trace_length: 1023,
    subgroup_size: 1024,
    blowup_factor: 8,
    query_count: 3,
    expected_result: Some(2_338_775_057),
    self_check: true,
};

fn default_self_check() -> bool {
    true
}

/// Public parameters of one proof session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProverConfig {
    /// Number of trace rows `L`.
    pub trace_length: usize,
    /// Size `n` of the multiplicative subgroup the trace is interpolated over.
    pub subgroup_size: usize,
    /// Ratio between the evaluation domain and the trace subgroup.
    pub blowup_factor: usize,
    /// Number of FRI queries.
    pub query_count: usize,
    /// Terminal value the trace must reach, when pinned.
    #[serde(default)]
    pub expected_result: Option<u64>,
    /// Replays the verifier arithmetic on every query before emitting the proof.
    #[serde(default = "default_self_check")]
    pub self_check: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        PROFILE_FIBSQ_1023
    }
}

/// Configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A dimension that must be a power of two is not.
    NotPowerOfTwo {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: usize,
    },
    /// Trace shorter than the transition constraint needs.
    TraceTooShort {
        /// Minimum supported length.
        min: usize,
        /// Configured length.
        got: usize,
    },
    /// Trace does not fit strictly inside the subgroup.
    TraceTooLong {
        /// Configured trace length.
        trace_length: usize,
        /// Configured subgroup size.
        subgroup_size: usize,
    },
    /// Blowup too small for the query layout.
    BlowupTooSmall {
        /// Minimum supported blowup.
        min: usize,
        /// Configured blowup.
        got: usize,
    },
    /// Evaluation domain size does not divide the multiplicative group order.
    DomainTooLarge {
        /// Requested evaluation domain size.
        size: usize,
    },
    /// At least one query is required.
    NoQueries,
    /// Pinned result is not a canonical field element.
    ResultOutOfField {
        /// Configured result.
        value: u64,
    },
    /// Reading the configuration file failed.
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
    /// The configuration file is not valid JSON for [`ProverConfig`].
    Parse {
        /// Underlying parser error message.
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPowerOfTwo { field, value } => {
                write!(f, "{field} must be a power of two (got {value})")
            }
            ConfigError::TraceTooShort { min, got } => {
                write!(f, "trace length must be at least {min} (got {got})")
            }
            ConfigError::TraceTooLong {
                trace_length,
                subgroup_size,
            } => write!(
                f,
                "trace length {trace_length} must be smaller than the subgroup size {subgroup_size}"
            ),
            ConfigError::BlowupTooSmall { min, got } => {
                write!(f, "blowup factor must be at least {min} (got {got})")
            }
            ConfigError::DomainTooLarge { size } => write!(
                f,
                "evaluation domain of size {size} does not divide the multiplicative group order"
            ),
            ConfigError::NoQueries => write!(f, "query count must be at least 1"),
            ConfigError::ResultOutOfField { value } => {
                write!(f, "expected result {value} is not a canonical field element")
            }
            ConfigError::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            ConfigError::Parse { message } => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ProverConfig {
    /// Size `k` of the evaluation domain.
    pub fn domain_size(&self) -> usize {
        self.subgroup_size * self.blowup_factor
    }

    /// Largest index a query may start at so that `x`, `gx` and `g^2 x` stay in range.
    pub fn max_query_index(&self) -> usize {
        self.domain_size() - 1 - 2 * self.blowup_factor
    }

    /// Checks every structural invariant of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_power_of_two("subgroup_size", self.subgroup_size)?;
        validate_power_of_two("blowup_factor", self.blowup_factor)?;
        validate_trace(self.trace_length, self.subgroup_size)?;
        if self.blowup_factor < MIN_BLOWUP_FACTOR {
            return Err(ConfigError::BlowupTooSmall {
                min: MIN_BLOWUP_FACTOR,
                got: self.blowup_factor,
            });
        }
        validate_domain(self.subgroup_size, self.blowup_factor)?;
        if self.query_count == 0 {
            return Err(ConfigError::NoQueries);
        }
        if let Some(value) = self.expected_result {
            if FieldElement::from_canonical(value).is_none() {
                return Err(ConfigError::ResultOutOfField { value });
            }
        }
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Digest binding the public dimensions and the claimed result.
    ///
    /// Layout: domain tag, then `trace_length`, `subgroup_size`,
    /// `blowup_factor`, `query_count`, modulus, generator and `result`, each
    /// as `u64` little-endian.
    pub fn instance_digest(&self, result: &FieldElement) -> Hash {
        let mut digest = ParameterDigest::new();
        digest
            .absorb_bytes(INSTANCE_DIGEST_DOMAIN_TAG)
            .absorb_u64(self.trace_length as u64)
            .absorb_u64(self.subgroup_size as u64)
            .absorb_u64(self.blowup_factor as u64)
            .absorb_u64(self.query_count as u64)
            .absorb_u64(FieldElement::MODULUS.value)
            .absorb_u64(FieldElement::GENERATOR.as_u64())
            .absorb_u64(result.as_u64());
        digest.finalize()
    }
}

fn validate_power_of_two(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if !value.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo { field, value });
    }
    Ok(())
}

fn validate_trace(trace_length: usize, subgroup_size: usize) -> Result<(), ConfigError> {
    if trace_length < MIN_TRACE_LENGTH {
        return Err(ConfigError::TraceTooShort {
            min: MIN_TRACE_LENGTH,
            got: trace_length,
        });
    }
    if trace_length >= subgroup_size {
        return Err(ConfigError::TraceTooLong {
            trace_length,
            subgroup_size,
        });
    }
    Ok(())
}

fn validate_domain(subgroup_size: usize, blowup_factor: usize) -> Result<(), ConfigError> {
    let size = subgroup_size
        .checked_mul(blowup_factor)
        .ok_or(ConfigError::DomainTooLarge { size: usize::MAX })?;
    if FieldElement::group_order() % size as u64 != 0 {
        return Err(ConfigError::DomainTooLarge { size });
    }
    Ok(())
}

/// Secret start value of the sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Witness {
    /// Second trace element, `t[1]`.
    pub secret: u64,
}

impl Witness {
    /// Secret used by the canonical claim.
    pub const CANONICAL_SECRET: u64 = 3_141_592;

    /// Wraps a secret value.
    pub const fn new(secret: u64) -> Self {
        Self { secret }
    }
}

impl Default for Witness {
    fn default() -> Self {
        Self::new(Self::CANONICAL_SECRET)
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Witness")
            .field("secret", &"<redacted>")
            .finish()
    }
}
