use super::modular::{impl_modular_ops, Modular};
use crate::curve::Curve;
use crate::error::EccError;

use bigint::{Encoding, NonZero, U256};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use std::marker::PhantomData;

/// An integer modulo the order of the curve's base point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar<C: Curve>(U256, PhantomData<C>);

impl<C: Curve> Scalar<C> {
    pub const ZERO: Self = Self(U256::ZERO, PhantomData);
    pub const ONE: Self = Self(U256::ONE, PhantomData);

    /// Uniformly random scalar in `[1, n - 1]`.
    ///
    /// Out of range draws are rejected and redrawn instead of reduced, so the
    /// result carries no modulo bias.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            let mut candidate = U256::from_be_bytes(bytes);
            if candidate != U256::ZERO && candidate < C::ORDER {
                bytes.zeroize();
                return Self(candidate, PhantomData);
            }
            candidate.zeroize();
            log::debug!("random scalar out of range, drawing again");
        }
    }

    /// Interprets 32 big-endian bytes as a scalar in `[1, n - 1]` without
    /// reducing it.
    pub fn from_be_bytes_checked(bytes: &[u8]) -> Result<Self, EccError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| EccError::InvalidKey)?;
        let number = U256::from_be_bytes(bytes);
        if number == U256::ZERO || number >= C::ORDER {
            return Err(EccError::InvalidKey);
        }
        Ok(Self(number, PhantomData))
    }

    /// Reduces a message digest into the scalar field.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self::new(U256::from_be_bytes(*digest))
    }
}

impl<C: Curve> Modular for Scalar<C> {
    const MODULUS: U256 = C::ORDER;

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

impl<C: Curve> Zeroize for Scalar<C> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl_modular_ops!(Scalar);
