use super::modular::{impl_modular_ops, Modular};
use crate::curve::Curve;
use crate::error::EccError;

use bigint::{Encoding, NonZero, U256};

use std::marker::PhantomData;

/// An element of the prime field the curve is defined over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement<C: Curve>(pub(crate) U256, pub(crate) PhantomData<C>);

impl<C: Curve> FieldElement<C> {
    pub const ONE: Self = Self(U256::ONE, PhantomData);
    pub const ZERO: Self = Self(U256::ZERO, PhantomData);

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self::new(U256::from_be_bytes(bytes))
    }

    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, EccError> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| EccError::InvalidEncoding("field element must be 32 bytes"))?;
        Ok(Self::from_be_bytes(bytes))
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, EccError> {
        let inverse = rhs.inverse().ok_or(EccError::InvalidOperand)?;
        Ok(Modular::mul(self, &inverse))
    }

    /// Square root for primes `p = 3 (mod 4)`, i.e. `self^((p + 1) / 4)`.
    ///
    /// Returns `None` when `self` is a quadratic non-residue: the
    /// exponentiation alone would happily return garbage in that case.
    pub fn sqrt(&self) -> Option<Self> {
        let exponent = Self::MODULUS.wrapping_add(&U256::ONE).shr_vartime(2);
        let root = self.pow(&exponent);
        if &root.square() == self {
            Some(root)
        } else {
            None
        }
    }
}

impl<C: Curve> Modular for FieldElement<C> {
    const MODULUS: U256 = C::PRIME_MODULUS;

    fn new(number: U256) -> Self {
        let reduced = if number < Self::MODULUS {
            number
        } else {
            // NOTE unwrap is fine here because the modulus
            // can be safely assumed to be nonzero
            number % NonZero::new(Self::MODULUS).unwrap()
        };

        Self(reduced, PhantomData)
    }

    fn inner(&self) -> &U256 {
        &self.0
    }
}

impl_modular_ops!(FieldElement);
