//! Windowed non-adjacent form scalar multiplication.

use super::modular::{is_odd, Modular};
use super::point::Point;
use super::scalar::Scalar;
use crate::curve::Curve;
use crate::error::EccError;
use crate::U256;

use bigint::Encoding;

/// Window width for a scalar of the given bit length.
///
/// Wider windows need a larger table of odd multiples, so they only pay
/// off for longer scalars.
pub fn window_width(bits: usize) -> u8 {
    match bits {
        0..=12 => 2,
        13..=40 => 3,
        41..=120 => 4,
        121..=336 => 5,
        337..=896 => 6,
        897..=2304 => 7,
        _ => 8,
    }
}

/// Signed digits of a scalar, least significant first.
///
/// Every nonzero digit is odd with absolute value below `2^(width - 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowNaf {
    width: u8,
    digits: Vec<i8>,
}

impl WindowNaf {
    /// Recodes `scalar` with the given window width in `2..=8`.
    ///
    /// The scalar must stay below `2^256 - 2^7` so that subtracting a
    /// negative digit cannot overflow. Reduced scalars always do.
    pub fn new(width: u8, scalar: &U256) -> Result<Self, EccError> {
        if !(2..=8).contains(&width) {
            return Err(EccError::InvalidRecoding("window width must be in 2..=8"));
        }
        if scalar > &U256::MAX.wrapping_sub(&U256::from_u8(1 << 7)) {
            return Err(EccError::InvalidRecoding("scalar is too close to 2^256"));
        }
        let window = 1i16 << width;
        let half_window = window >> 1;

        let mut k = *scalar;
        let mut digits = Vec::with_capacity(k.bits_vartime() + 1);
        while k != U256::ZERO {
            if is_odd(&k) {
                let low = i16::from(k.to_be_bytes()[31]) & (window - 1);
                let digit = if low & half_window != 0 {
                    low - window
                } else {
                    low
                };
                k = if digit > 0 {
                    k.wrapping_sub(&U256::from_u8(digit as u8))
                } else {
                    k.wrapping_add(&U256::from_u8((-digit) as u8))
                };
                digits.push(digit as i8);
            } else {
                digits.push(0);
            }
            k = k.shr_vartime(1);
        }

        Ok(Self { width, digits })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn digits(&self) -> &[i8] {
        &self.digits
    }
}

/// `scalar * point`.
pub fn multiply<C: Curve>(point: &Point<C>, scalar: &Scalar<C>) -> Result<Point<C>, EccError> {
    if point.is_identity() || scalar.is_zero() {
        return Ok(Point::IDENTITY);
    }

    let k = scalar.inner();
    let naf = WindowNaf::new(window_width(k.bits_vartime()), k)?;
    let table = odd_multiples(point, naf.width())?;

    let mut acc = Point::<C>::IDENTITY;
    for &digit in naf.digits().iter().rev() {
        acc = acc.double()?;
        let index = (i16::from(digit).unsigned_abs() as usize) >> 1;
        match digit.signum() {
            1 => acc = acc.add(&table[index])?,
            -1 => acc = acc.sub(&table[index])?,
            _ => {}
        }
    }
    Ok(acc)
}

// [P, 3P, 5P, ..., (2^(w-1) - 1)P]
fn odd_multiples<C: Curve>(point: &Point<C>, width: u8) -> Result<Vec<Point<C>>, EccError> {
    let len = 1usize << (width - 2);
    let mut table = Vec::with_capacity(len);
    table.push(*point);
    let twice = point.double()?;
    for i in 1..len {
        let next = twice.add(&table[i - 1])?;
        table.push(next);
    }
    Ok(table)
}
