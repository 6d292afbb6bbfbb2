//! FRI commit and decommit for the composition polynomial.
//!
//! * [`folding`]: the pure folding step on polynomials and domains.
//! * [`layer`]: a committed layer (polynomial, domain, evaluations, tree).
//! * [`prover`]: the commit loop that folds down to a constant.
//! * [`query`]: per-query openings on the trace extension and every layer.

pub mod folding;
pub mod layer;
pub mod prover;
pub mod query;
pub mod types;

pub use folding::{fold_count, next_fri_domain, next_fri_layer, next_fri_polynomial};
pub use layer::FriLayer;
pub use prover::{fri_commit, CommitPhase};
pub use query::{decommit_query, trace_values};
pub use types::{FriCommitment, FriError, LayerOpenings, Opening, QueryDecommitment};
