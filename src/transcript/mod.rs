//! Fiat–Shamir transcript for the proof session.
//!
//! Labels are enum variants with fixed domain tags; a phase tracker accepts
//! them only in the canonical order:
//!
//! | Phase | Labels |
//! |-------|--------|
//! | TraceCommit | [`TranscriptLabel::TraceRoot`] |
//! | Composition | [`TranscriptLabel::CompositionAlpha`] `0..3`, [`TranscriptLabel::CompositionRoot`] |
//! | Fri | ([`TranscriptLabel::FriFoldChallenge`] `i`, [`TranscriptLabel::FriLayerRoot`] `i + 1`)*, [`TranscriptLabel::FriFinalConstant`] |
//! | Queries | ([`TranscriptLabel::QueryIndex`], trace openings, layer openings, [`TranscriptLabel::QueryFinalConstant`])* |
//!
//! Identical seeds and identical label/value sequences yield identical
//! challenges.

mod core;
mod types;

pub use self::core::{query_entries, Transcript, COMPOSITION_ALPHAS};
pub use self::types::{LayerSide, TraceOffset, TranscriptError, TranscriptLabel, TranscriptPhase};
