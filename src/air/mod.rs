//! # Algebraic Intermediate Representation (AIR)
//!
//! Dieses Modul beschreibt die Ausfuehrungsspur der Fibonacci-Quadrat-Folge
//! und die drei algebraischen Nebenbedingungen, deren Quotienten zum
//! Kompositionspolynom zusammengefasst werden.
//!
//! ## Uebersicht
//!
//! * [`trace`] baut die Spur `t[0] = 1`, `t[1] = secret`,
//!   `t[i] = t[i-2]^2 + t[i-1]^2`.
//! * [`constraints`] berechnet die Quotienten `p0` (Startwert), `p1`
//!   (Ergebnis) und `p2` (Uebergang) durch exakte Polynomdivision.
//! * [`composition`] kombiniert die Quotienten mit den Zufallskoeffizienten
//!   `alpha_i` und rechnet dieselbe Kombination punktweise aus geoeffneten
//!   Spurwerten nach.
//! * [`errors`] benennt alle deterministischen Fehlertypen.
//!
//! ## Determinismus
//!
//! Die Reihenfolge der Nebenbedingungen ist fest (`p0`, `p1`, `p2`) und
//! bestimmt die Zuordnung zu `alpha_0 .. alpha_2`.

pub mod composition;
pub mod constraints;
pub mod errors;
pub mod trace;

pub use composition::{deduce_composition_value, TraceOpenings};
pub use constraints::{build_constraints, transition_denominator, ConstraintPolynomials};
pub use errors::{AirError, ConstraintKind};
pub use trace::Trace;

/// Anzahl der Nebenbedingungen und damit der Koeffizienten `alpha_i`.
pub const CONSTRAINT_COUNT: usize = 3;
