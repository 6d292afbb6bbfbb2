//! Fehlertypen der AIR.
//!
//! Die Fehler sind deterministisch und beenden die Beweissitzung. Es gibt
//! keine implizite Wiederherstellung.

use core::fmt;

use crate::field::{FieldElement, PolynomialError};

/// Kennung einer Nebenbedingung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `f(1) = 1`.
    FirstValue,
    /// `f(g^(L-1)) = result`.
    Result,
    /// `f(g^2 x) = f(g x)^2 + f(x)^2` auf `g^0 .. g^(L-3)`.
    Transition,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::FirstValue => "first value",
            ConstraintKind::Result => "result",
            ConstraintKind::Transition => "transition",
        };
        f.write_str(name)
    }
}

/// Auflistung aller Fehler beim Aufbau von Spur und Nebenbedingungen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirError {
    /// Das Geheimnis ist kein kanonisches Feldelement.
    SecretOutOfField {
        /// Uebergebener Wert.
        secret: u64,
    },
    /// Die Spur ist zu kurz fuer die Uebergangsbedingung.
    TraceTooShort {
        /// Mindestlaenge.
        min: usize,
        /// Angeforderte Laenge.
        got: usize,
    },
    /// Die Division einer Nebenbedingung liess einen Rest.
    InvalidTrace {
        /// Betroffene Nebenbedingung.
        constraint: ConstraintKind,
    },
    /// Ein Nenner verschwindet am Auswertungspunkt.
    VanishingDenominator {
        /// Betroffene Nebenbedingung.
        constraint: ConstraintKind,
        /// Auswertungspunkt.
        point: FieldElement,
    },
    /// Sonstiger Fehler der Polynomarithmetik.
    Polynomial(PolynomialError),
}

impl fmt::Display for AirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirError::SecretOutOfField { secret } => {
                write!(f, "secret {secret} is not a canonical field element")
            }
            AirError::TraceTooShort { min, got } => {
                write!(f, "trace length must be at least {min} (got {got})")
            }
            AirError::InvalidTrace { constraint } => {
                write!(f, "{constraint} constraint does not divide exactly")
            }
            AirError::VanishingDenominator { constraint, point } => {
                write!(f, "{constraint} denominator vanishes at {point}")
            }
            AirError::Polynomial(err) => write!(f, "polynomial arithmetic failed: {err}"),
        }
    }
}

impl std::error::Error for AirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AirError::Polynomial(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PolynomialError> for AirError {
    fn from(err: PolynomialError) -> Self {
        AirError::Polynomial(err)
    }
}
