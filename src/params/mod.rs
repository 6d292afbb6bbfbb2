#![forbid(unsafe_code)]

//! Public parameters derived from a [`ProverConfig`](crate::config::ProverConfig).
//!
//! | Symbol | Value | Role |
//! |--------|-------|------|
//! | `g` | `5^((p-1)/n)` | generator of the trace subgroup `G` of order `n` |
//! | `w` | `5` | coset offset of the evaluation domain |
//! | `h` | `5^((p-1)/k)` | generator of the order-`k` subgroup, `k = n * blowup` |
//! | domain | `w * h^i` | evaluation coset in natural order |
//!
//! Since `h^blowup = g`, stepping `blowup` positions through the evaluation
//! domain multiplies the point by `g`.

mod public;

pub use public::PublicParameters;
