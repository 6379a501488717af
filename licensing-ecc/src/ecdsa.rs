//! ECDSA over a precomputed message digest.

use crate::arithmetic::{Modular, Point, Scalar};
use crate::curve::Secp256k1;
use crate::error::EccError;
use crate::keys::{PrivateKey, PublicKey, Signature};

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

type SecScalar = Scalar<Secp256k1>;

/// Signs a SHA-256 digest with a fresh random nonce.
///
/// Nonces yielding `r = 0` or `s = 0` are discarded and redrawn.
pub fn sign_digest<R: RngCore + CryptoRng>(
    digest: &[u8; 32],
    key: &PrivateKey,
    rng: &mut R,
) -> Result<Signature, EccError> {
    let z = SecScalar::from_digest(digest);
    loop {
        let mut k = SecScalar::random(rng);
        let r_point = Point::<Secp256k1>::GENERATOR.scalar_mul(&k)?;
        let r = match r_point.x() {
            Some(x) => SecScalar::new(*x.inner()),
            None => SecScalar::ZERO,
        };
        if r.is_zero() {
            k.zeroize();
            log::debug!("nonce produced r = 0, drawing again");
            continue;
        }

        // NOTE unwrap is fine here because k is drawn from [1, n - 1]
        let mut k_inv = k.inverse().unwrap();
        k.zeroize();
        // z + r d, every intermediate is wiped before the next draw
        let mut sum = Modular::mul(&r, key.scalar());
        sum += z;
        let s = Modular::mul(&k_inv, &sum);
        k_inv.zeroize();
        sum.zeroize();
        if s.is_zero() {
            log::debug!("nonce produced s = 0, drawing again");
            continue;
        }
        return Ok(Signature::from_scalars(r, s));
    }
}

/// Checks `signature` over a SHA-256 digest.
///
/// `r` and `s` are already known to be in `[1, n - 1]` and the public key is
/// never the identity, so the only way to fail is the equation itself.
pub fn verify_digest(digest: &[u8; 32], signature: &Signature, key: &PublicKey) -> bool {
    let z = SecScalar::from_digest(digest);
    let r = *signature.r();
    let w = match signature.s().inverse() {
        Some(w) => w,
        None => return false,
    };
    let u1 = z * w;
    let u2 = r * w;

    let point = match double_mul(&u1, key.as_point(), &u2) {
        Ok(point) => point,
        Err(e) => {
            log::debug!("signature check failed: {}", e);
            return false;
        }
    };

    match point.x() {
        Some(x) => SecScalar::new(*x.inner()) == r,
        None => {
            log::debug!("signature check reached the point at infinity");
            false
        }
    }
}

// u1 G + u2 Q
fn double_mul(
    u1: &SecScalar,
    q: &Point<Secp256k1>,
    u2: &SecScalar,
) -> Result<Point<Secp256k1>, EccError> {
    let lhs = Point::GENERATOR.scalar_mul(u1)?;
    let rhs = q.scalar_mul(u2)?;
    lhs.add(&rhs)
}
