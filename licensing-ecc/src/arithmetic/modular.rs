use bigint::{Encoding, NonZero, U256, U512};

/// Arithmetic shared by every integer type that lives in `[0, MODULUS)`.
///
/// Implementors only provide construction (which must reduce) and access to
/// the inner value, everything else is derived from the modulus.
pub trait Modular: Sized {
    const MODULUS: U256;

    fn new(number: U256) -> Self;

    fn inner(&self) -> &U256;

    fn add(&self, other: &Self) -> Self {
        Self::new(self.inner().add_mod(other.inner(), &Self::MODULUS))
    }

    fn neg(&self) -> Self {
        Self::new(self.inner().neg_mod(&Self::MODULUS))
    }

    fn sub(&self, other: &Self) -> Self {
        Self::new(self.inner().sub_mod(other.inner(), &Self::MODULUS))
    }

    fn mul(&self, other: &Self) -> Self {
        Self::new(mul_mod_u256(self.inner(), other.inner(), &Self::MODULUS))
    }

    fn square(&self) -> Self {
        self.mul(self)
    }

    fn is_zero(&self) -> bool {
        self.inner() == &U256::ZERO
    }

    fn is_odd(&self) -> bool {
        is_odd(self.inner())
    }

    /// Left-to-right square and multiply.
    fn pow(&self, exponent: &U256) -> Self {
        let mut result = Self::new(U256::ONE);
        for byte in exponent.to_be_bytes() {
            for shift in (0..8).rev() {
                result = result.square();
                if (byte >> shift) & 1 == 1 {
                    result = result.mul(self);
                }
            }
        }
        result
    }

    /// Multiplicative inverse by the binary extended Euclidean algorithm.
    ///
    /// Returns `None` for zero. The modulus must be an odd prime.
    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let modulus = Self::MODULUS;
        // invariants: x1 * self = u and x2 * self = v (mod modulus)
        let mut u = *self.inner();
        let mut v = modulus;
        let mut x1 = U256::ONE;
        let mut x2 = U256::ZERO;

        while u != U256::ONE && v != U256::ONE {
            while !is_odd(&u) {
                u = u.shr_vartime(1);
                x1 = half_mod(&x1, &modulus);
            }
            while !is_odd(&v) {
                v = v.shr_vartime(1);
                x2 = half_mod(&x2, &modulus);
            }
            if u >= v {
                u = u.wrapping_sub(&v);
                x1 = x1.sub_mod(&x2, &modulus);
            } else {
                v = v.wrapping_sub(&u);
                x2 = x2.sub_mod(&x1, &modulus);
            }
        }

        if u == U256::ONE {
            Some(Self::new(x1))
        } else {
            Some(Self::new(x2))
        }
    }

    fn to_be_bytes(&self) -> [u8; 32] {
        self.inner().to_be_bytes()
    }
}

pub(crate) fn is_odd(number: &U256) -> bool {
    number.to_be_bytes()[31] & 1 == 1
}

/// `number / 2 (mod modulus)` for an odd modulus and `number < modulus`.
fn half_mod(number: &U256, modulus: &U256) -> U256 {
    if is_odd(number) {
        // (number + modulus) / 2 without overflowing 256 bits
        number
            .shr_vartime(1)
            .wrapping_add(&modulus.shr_vartime(1))
            .wrapping_add(&U256::ONE)
    } else {
        number.shr_vartime(1)
    }
}

pub fn mul_mod_u256(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    // NOTE modulus is never zero, so unwrap is fine here
    let mod512 = NonZero::new(widen(modulus)).unwrap();
    // both factors are below 2^256 so the 512 bit product never wraps
    let product = widen(lhs).wrapping_mul(&widen(rhs));
    narrow(&(product % mod512))
}

fn widen(number: &U256) -> U512 {
    let mut bytes = [0u8; 64];
    bytes[32..].copy_from_slice(&number.to_be_bytes());
    U512::from_be_bytes(bytes)
}

// the upper half must be zero, i.e. the number is already reduced by a 256 bit modulus
fn narrow(number: &U512) -> U256 {
    U256::from_be_slice(&number.to_be_bytes()[32..])
}

/// Operator impls for a `Modular` newtype generic over the curve.
macro_rules! impl_modular_ops {
    ($this:ident) => {
        impl<C: Curve> std::ops::Add for $this<C> {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Modular::add(&self, &rhs)
            }
        }

        impl<'a, 'b, C: Curve> std::ops::Add<&'b $this<C>> for &'a $this<C> {
            type Output = $this<C>;
            fn add(self, rhs: &'b $this<C>) -> Self::Output {
                Modular::add(self, rhs)
            }
        }

        impl<C: Curve> std::ops::AddAssign for $this<C> {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<C: Curve> std::ops::Sub for $this<C> {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Modular::sub(&self, &rhs)
            }
        }

        impl<'a, 'b, C: Curve> std::ops::Sub<&'b $this<C>> for &'a $this<C> {
            type Output = $this<C>;
            fn sub(self, rhs: &'b $this<C>) -> Self::Output {
                Modular::sub(self, rhs)
            }
        }

        impl<C: Curve> std::ops::SubAssign for $this<C> {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<C: Curve> std::ops::Neg for $this<C> {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Modular::neg(&self)
            }
        }

        impl<C: Curve> std::ops::Neg for &$this<C> {
            type Output = $this<C>;
            fn neg(self) -> Self::Output {
                Modular::neg(self)
            }
        }

        impl<C: Curve> std::ops::Mul for $this<C> {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self::Output {
                Modular::mul(&self, &rhs)
            }
        }

        impl<'a, 'b, C: Curve> std::ops::Mul<&'b $this<C>> for &'a $this<C> {
            type Output = $this<C>;
            fn mul(self, rhs: &'b $this<C>) -> Self::Output {
                Modular::mul(self, rhs)
            }
        }

        impl<C: Curve> std::ops::MulAssign for $this<C> {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<C: Curve> PartialOrd for $this<C> {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<C: Curve> Ord for $this<C> {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.inner().cmp(other.inner())
            }
        }

        impl<C: Curve> std::hash::Hash for $this<C> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&Modular::to_be_bytes(self), state);
            }
        }

        impl<C: Curve> std::fmt::Display for $this<C> {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.inner())
            }
        }
    };
}

pub(crate) use impl_modular_ops;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wide_multiplication() {
        let modulus = U256::from_u32(17);
        assert_eq!(
            mul_mod_u256(&U256::from_u32(15), &U256::from_u32(9), &modulus),
            U256::from_u32(16)
        );
        // (2^256 - 1)^2 mod (2^256 - 1) = 0
        assert_eq!(mul_mod_u256(&U256::MAX, &U256::MAX, &U256::MAX), U256::ZERO);
        // (2^128)^2 = 2^256 = 1 (mod 2^256 - 1)
        let two_128 = U256::ONE.shl_vartime(128);
        assert_eq!(mul_mod_u256(&two_128, &two_128, &U256::MAX), U256::ONE);
    }

    #[test]
    fn halving() {
        let modulus = U256::from_u32(23);
        assert_eq!(half_mod(&U256::from_u32(10), &modulus), U256::from_u32(5));
        // 7 / 2 = 15 (mod 23) since 2 * 15 = 30 = 7
        assert_eq!(half_mod(&U256::from_u32(7), &modulus), U256::from_u32(15));
        assert_eq!(half_mod(&U256::from_u32(22), &modulus), U256::from_u32(11));
    }

    #[test]
    fn parity() {
        assert!(is_odd(&U256::ONE));
        assert!(!is_odd(&U256::ZERO));
        assert!(is_odd(&U256::MAX));
        assert!(!is_odd(&U256::from_u32(256)));
    }
}
