//! Prime field arithmetic for the Fibonacci-squared prover.
//!
//! The field is `F_p` with `p = 3 * 2^30 + 1`.  The multiplicative group has
//! order `3 * 2^30`, so it contains multiplicative subgroups of every power of
//! two up to `2^30`; the trace subgroup and the evaluation coset are both
//! carved out of it.

use core::fmt;

/// Metadata describing the underlying field modulus.
#[derive(Debug, Clone, Copy)]
pub struct Modulus {
    /// Prime modulus value in canonical representation.
    pub value: u64,
    /// Largest `k` such that `2^k` divides `value - 1`.
    pub two_adicity: u32,
}

impl Modulus {
    /// Creates a new modulus descriptor.
    pub const fn new(value: u64, two_adicity: u32) -> Self {
        Self { value, two_adicity }
    }
}

/// Modulus of the default field, `3 * 2^30 + 1`.
pub const DEFAULT_MODULUS: Modulus = Modulus::new(3 * (1 << 30) + 1, 30);

/// Field element represented as a canonical value modulo the prime.
///
/// The wrapped integer is always within `[0, MODULUS.value)`.  Since the
/// modulus fits into 32 bits, products of two canonical values fit into a
/// `u64` and are reduced directly.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(u64);

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.0).finish()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FieldElement {
    /// Canonical prime modulus associated with this field.
    pub const MODULUS: Modulus = DEFAULT_MODULUS;
    /// Designated generator of the full multiplicative group.
    pub const GENERATOR: FieldElement = FieldElement(5);
    /// Additive identity in canonical form.
    pub const ZERO: FieldElement = FieldElement(0);
    /// Multiplicative identity in canonical form.
    pub const ONE: FieldElement = FieldElement(1);

    /// Returns the canonical integer representative.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Builds an element from a value already known to be canonical.
    ///
    /// Returns `None` when `value >= MODULUS`.
    pub const fn from_canonical(value: u64) -> Option<Self> {
        if value < Self::MODULUS.value {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Order of the multiplicative group, `p - 1`.
    pub const fn group_order() -> u64 {
        Self::MODULUS.value - 1
    }

    /// Raises the element to `exponent` by square-and-multiply.
    pub fn pow(&self, mut exponent: u64) -> Self {
        let mut base = *self;
        let mut acc = Self::ONE;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc.mul(&base);
            }
            base = base.square();
            exponent >>= 1;
        }
        acc
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Maps uniformly distributed transcript bytes onto the field.
    ///
    /// The first 16 bytes are read as a little-endian `u128` and reduced, which
    /// keeps the bias below `2^-96`.
    pub fn from_transcript_bytes(bytes: &[u8; 32]) -> Self {
        let mut wide = [0u8; 16];
        wide.copy_from_slice(&bytes[..16]);
        let value = u128::from_le_bytes(wide) % Self::MODULUS.value as u128;
        Self(value as u64)
    }

    /// Returns the canonical little-endian encoding used for commitments.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(value % Self::MODULUS.value)
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        Self::from(value as u64)
    }
}

impl From<FieldElement> for u64 {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

/// Trait describing the arithmetic contract for field elements.
pub trait FieldElementOps: Sized {
    /// Adds two canonical field elements, returning the canonical representative.
    fn add(&self, rhs: &Self) -> Self;
    /// Subtracts `rhs` from `self` in canonical form.
    fn sub(&self, rhs: &Self) -> Self;
    /// Computes the additive inverse of `self`.
    fn neg(&self) -> Self;
    /// Multiplies two field elements.
    fn mul(&self, rhs: &Self) -> Self;
    /// Squares the field element.
    fn square(&self) -> Self;
    /// Computes the multiplicative inverse, returning `None` for zero.
    fn inv(&self) -> Option<Self>;
    /// Divides by `rhs`, returning `None` when `rhs` is zero.
    fn div(&self, rhs: &Self) -> Option<Self> {
        rhs.inv().map(|inverse| self.mul(&inverse))
    }
}

impl FieldElementOps for FieldElement {
    fn add(&self, rhs: &Self) -> Self {
        let sum = self.0 + rhs.0;
        if sum >= Self::MODULUS.value {
            Self(sum - Self::MODULUS.value)
        } else {
            Self(sum)
        }
    }

    fn sub(&self, rhs: &Self) -> Self {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self(self.0 + Self::MODULUS.value - rhs.0)
        }
    }

    fn neg(&self) -> Self {
        if self.0 == 0 {
            *self
        } else {
            Self(Self::MODULUS.value - self.0)
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self((self.0 * rhs.0) % Self::MODULUS.value)
    }

    fn square(&self) -> Self {
        self.mul(self)
    }

    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.pow(Self::MODULUS.value - 2))
    }
}

/// Computes the inverses of all `values` with a single field inversion.
///
/// Returns `None` if any input is zero.
pub fn batch_inverse(values: &[FieldElement]) -> Option<Vec<FieldElement>> {
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = FieldElement::ONE;
    for value in values {
        if value.is_zero() {
            return None;
        }
        prefix.push(acc);
        acc = acc.mul(value);
    }

    let mut inverse_acc = acc.inv()?;
    let mut inverses = vec![FieldElement::ZERO; values.len()];
    for index in (0..values.len()).rev() {
        inverses[index] = inverse_acc.mul(&prefix[index]);
        inverse_acc = inverse_acc.mul(&values[index]);
    }
    Some(inverses)
}
