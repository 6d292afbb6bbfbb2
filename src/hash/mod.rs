//! Hashing primitives shared by the commitment tree and the transcript.
//!
//! * [`deterministic`]: Blake2s digests, hex rendering and the counter-mode
//!   XOF that feeds transcript challenges.
//! * [`keyed`]: BLAKE3 keyed digests binding public parameters.

pub mod deterministic;
pub mod keyed;

pub use deterministic::{hash, hash_pair, Blake2sXof, Hash, Hasher, HexOutput, DIGEST_SIZE};
pub use keyed::{ParameterDigest, PARAMETER_DIGEST_KEY};
