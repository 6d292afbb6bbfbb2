//! # Proof module overview
//!
//! ```text
//! proof
//! ├── types   - the serialisable [`types::Proof`] and its entries
//! └── prover  - the session pipeline exporting [`prover::prove`]
//! ```

pub mod prover;
pub mod types;

pub use prover::{prove, ProverOutput};
pub use types::{Proof, ProofEntry};
