use crate::U256;

/// Short Weierstrass curve `y^2 = x^3 + ax + b` over a prime field, given by
/// its domain parameters.
pub trait Curve: Clone + Copy + std::fmt::Debug + PartialEq + Eq + Send + Sync {
    const PRIME_MODULUS: U256;
    const ORDER: U256;
    const GENERATOR_X: U256;
    const GENERATOR_Y: U256;
    const COEFF_A: U256;
    const COEFF_B: U256;
    const COFACTOR: U256;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1;

impl Curve for Secp256k1 {
    const PRIME_MODULUS: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
    const ORDER: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
    const GENERATOR_X: U256 =
        U256::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
    const COEFF_A: U256 = U256::ZERO;
    const COEFF_B: U256 = U256::from_u8(7);
    const COFACTOR: U256 = U256::ONE;
}

#[cfg(test)]
mod test {
    use super::*;
    use bigint::{Encoding, NonZero};

    #[test]
    fn prime_modulus_shape() {
        // p = 2^256 - 2^32 - 977
        let offset = U256::from_u64((1 << 32) + 977);
        assert_eq!(Secp256k1::PRIME_MODULUS.wrapping_add(&offset), U256::ZERO);
        // p = 3 (mod 4) is what makes the square root a single exponentiation
        let four = NonZero::new(U256::from_u8(4)).unwrap();
        assert_eq!(Secp256k1::PRIME_MODULUS % four, U256::from_u8(3));
    }

    #[test]
    fn order_is_below_modulus() {
        assert!(Secp256k1::ORDER < Secp256k1::PRIME_MODULUS);
        assert_eq!(Secp256k1::COFACTOR, U256::ONE);
        assert_eq!(Secp256k1::ORDER.to_be_bytes()[0], 0xff);
    }
}
