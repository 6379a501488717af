use super::field::FieldElement;
use super::modular::Modular;
use super::scalar::Scalar;
use super::wnaf;
use crate::curve::Curve;
use crate::error::EccError;
use crate::U256;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub const COMPRESSED_LEN: usize = 33;
pub const UNCOMPRESSED_LEN: usize = 65;

const TAG_IDENTITY: u8 = 0x00;
const TAG_COMPRESSED_EVEN: u8 = 0x02;
const TAG_COMPRESSED_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;
const TAG_HYBRID_EVEN: u8 = 0x06;
const TAG_HYBRID_ODD: u8 = 0x07;

/// Affine point of the curve, or the point at infinity.
///
/// The coordinates of the identity carry no meaning, `infinity` decides.
#[derive(Clone, Copy, Debug)]
pub struct Point<C: Curve> {
    x: FieldElement<C>,
    y: FieldElement<C>,
    infinity: bool,
}

impl<C: Curve> Point<C> {
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: true,
    };

    pub const GENERATOR: Self = Self {
        x: FieldElement(C::GENERATOR_X, PhantomData),
        y: FieldElement(C::GENERATOR_Y, PhantomData),
        infinity: false,
    };

    /// Finite point from affine coordinates, rejected if not on the curve.
    pub fn new(x: FieldElement<C>, y: FieldElement<C>) -> Result<Self, EccError> {
        let point = Self::new_unchecked(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(EccError::InvalidEncoding("point is not on the curve"))
        }
    }

    pub(crate) fn new_unchecked(x: FieldElement<C>, y: FieldElement<C>) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    #[inline(always)]
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    #[inline(always)]
    pub fn x(&self) -> Option<&FieldElement<C>> {
        if self.infinity {
            None
        } else {
            Some(&self.x)
        }
    }

    #[inline(always)]
    pub fn y(&self) -> Option<&FieldElement<C>> {
        if self.infinity {
            None
        } else {
            Some(&self.y)
        }
    }

    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        self.y.square() == curve_rhs(&self.x)
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, EccError> {
        if self.infinity {
            return Ok(*rhs);
        }
        if rhs.infinity {
            return Ok(*self);
        }
        if self.x == rhs.x && self.y == -rhs.y {
            return Ok(Self::IDENTITY);
        }
        if self == rhs {
            return self.double();
        }
        // equal x with unrelated y only happens off the curve, the division
        // reports it as InvalidOperand
        let slope = (rhs.y - self.y).div(&(rhs.x - self.x))?;
        Ok(self.chord_point(&slope, &rhs.x))
    }

    pub fn double(&self) -> Result<Self, EccError> {
        if self.infinity || self.y.is_zero() {
            return Ok(Self::IDENTITY);
        }
        let a = FieldElement::new(C::COEFF_A);
        let two = FieldElement::new(U256::from_u8(2));
        let three = FieldElement::new(U256::from_u8(3));
        let slope = (three * self.x.square() + a).div(&(two * self.y))?;
        Ok(self.chord_point(&slope, &self.x))
    }

    pub fn negate(&self) -> Self {
        if self.infinity {
            return *self;
        }
        Self {
            x: self.x,
            y: -self.y,
            infinity: false,
        }
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self, EccError> {
        self.add(&rhs.negate())
    }

    pub fn scalar_mul(&self, scalar: &Scalar<C>) -> Result<Self, EccError> {
        wnaf::multiply(self, scalar)
    }

    // third intersection of the line through self with the given slope,
    // reflected over the x axis
    fn chord_point(&self, slope: &FieldElement<C>, other_x: &FieldElement<C>) -> Self {
        let x = slope.square() - self.x - *other_x;
        let y = *slope * (self.x - x) - self.y;
        Self::new_unchecked(x, y)
    }

    /// SEC1 encoding: `0x00` for the identity, otherwise a parity tagged x
    /// coordinate (compressed) or `0x04 || x || y`.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        if self.infinity {
            return vec![TAG_IDENTITY];
        }
        if compressed {
            let mut bytes = Vec::with_capacity(COMPRESSED_LEN);
            bytes.push(if self.y.is_odd() {
                TAG_COMPRESSED_ODD
            } else {
                TAG_COMPRESSED_EVEN
            });
            bytes.extend_from_slice(&self.x.to_be_bytes());
            bytes
        } else {
            let mut bytes = Vec::with_capacity(UNCOMPRESSED_LEN);
            bytes.push(TAG_UNCOMPRESSED);
            bytes.extend_from_slice(&self.x.to_be_bytes());
            bytes.extend_from_slice(&self.y.to_be_bytes());
            bytes
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        let (tag, body) = bytes
            .split_first()
            .ok_or(EccError::InvalidEncoding("empty point encoding"))?;
        match *tag {
            TAG_IDENTITY => {
                if !body.is_empty() {
                    return Err(EccError::InvalidEncoding(
                        "incorrect length for infinity encoding",
                    ));
                }
                Ok(Self::IDENTITY)
            }
            TAG_COMPRESSED_EVEN | TAG_COMPRESSED_ODD => {
                if bytes.len() != COMPRESSED_LEN {
                    return Err(EccError::InvalidEncoding(
                        "incorrect length for compressed encoding",
                    ));
                }
                let x = coordinate::<C>(body)?;
                Self::decompress(x, *tag == TAG_COMPRESSED_ODD)
            }
            TAG_UNCOMPRESSED | TAG_HYBRID_EVEN | TAG_HYBRID_ODD => {
                if bytes.len() != UNCOMPRESSED_LEN {
                    return Err(EccError::InvalidEncoding(
                        "incorrect length for uncompressed/hybrid encoding",
                    ));
                }
                let x = coordinate::<C>(&body[..32])?;
                let y = coordinate::<C>(&body[32..])?;
                if *tag != TAG_UNCOMPRESSED && y.is_odd() != (*tag == TAG_HYBRID_ODD) {
                    return Err(EccError::InvalidEncoding("hybrid tag disagrees with y parity"));
                }
                Self::new(x, y)
            }
            _ => Err(EccError::InvalidEncoding("unknown point encoding tag")),
        }
    }

    /// Parses public key material in any of the layouts found in the wild:
    /// SEC1 (33 or 65 bytes), raw `x || y` (64 bytes) optionally behind an
    /// 8 byte header (72 bytes), or `x || y || d` (96 bytes, 104 with header).
    pub fn from_key_material(bytes: &[u8]) -> Result<Self, EccError> {
        let len = bytes.len();
        match len {
            COMPRESSED_LEN | UNCOMPRESSED_LEN => Self::from_bytes(bytes),
            64 | 72 => Self::from_raw_coordinates(&bytes[len - 64..]),
            96 | 104 => Self::from_raw_coordinates(&bytes[len - 96..len - 32]),
            _ => Err(EccError::InvalidEncoding("unsupported public key length")),
        }
    }

    fn from_raw_coordinates(bytes: &[u8]) -> Result<Self, EccError> {
        let x = coordinate::<C>(&bytes[..32])?;
        let y = coordinate::<C>(&bytes[32..64])?;
        Self::new(x, y)
    }

    fn decompress(x: FieldElement<C>, odd: bool) -> Result<Self, EccError> {
        let mut y = curve_rhs(&x)
            .sqrt()
            .ok_or(EccError::InvalidEncoding("x coordinate is not on the curve"))?;
        if y.is_odd() != odd {
            y = -y;
        }
        Ok(Self::new_unchecked(x, y))
    }
}

// x^3 + ax + b
fn curve_rhs<C: Curve>(x: &FieldElement<C>) -> FieldElement<C> {
    let a = FieldElement::new(C::COEFF_A);
    let b = FieldElement::new(C::COEFF_B);
    (x.square() + a) * *x + b
}

// canonical coordinate, i.e. strictly below the field modulus
fn coordinate<C: Curve>(bytes: &[u8]) -> Result<FieldElement<C>, EccError> {
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| EccError::InvalidEncoding("coordinate must be 32 bytes"))?;
    let number = <U256 as bigint::Encoding>::from_be_bytes(bytes);
    if number >= C::PRIME_MODULUS {
        return Err(EccError::InvalidEncoding("coordinate exceeds the field modulus"));
    }
    Ok(FieldElement::new(number))
}

impl<C: Curve> PartialEq for Point<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl<C: Curve> Eq for Point<C> {}

// agrees with PartialEq: every identity hashes alike
impl<C: Curve> Hash for Point<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.infinity.hash(state);
        if !self.infinity {
            self.x.hash(state);
            self.y.hash(state);
        }
    }
}

impl<C: Curve> PartialOrd for Point<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// identity first, then by x and y
impl<C: Curve> Ord for Point<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.infinity, other.infinity) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.x.cmp(&other.x).then_with(|| self.y.cmp(&other.y)),
        }
    }
}

impl<C: Curve> std::ops::Neg for Point<C> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<C: Curve> std::ops::Neg for &Point<C> {
    type Output = Point<C>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<C: Curve> fmt::Display for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes(true)))
    }
}
