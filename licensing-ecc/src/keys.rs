//! Key and signature containers with their byte and hex encodings.

use crate::arithmetic::{Modular, Point, Scalar, COMPRESSED_LEN};
use crate::curve::Secp256k1;
use crate::error::EccError;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use std::fmt;

pub const PRIVATE_KEY_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = COMPRESSED_LEN;
pub const SIGNATURE_LEN: usize = 64;

/// A secp256k1 private key, wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(Scalar<Secp256k1>);

impl PrivateKey {
    pub(crate) fn from_scalar(scalar: Scalar<Secp256k1>) -> Self {
        Self(scalar)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        Scalar::from_be_bytes_checked(bytes).map(Self)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        let mut bytes = hex::decode(hex_str.trim())?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.0.to_be_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        // NOTE unwrap is fine here because the generator lies on the curve
        // so every multiple of it can be computed
        PublicKey(Point::GENERATOR.scalar_mul(&self.0).unwrap())
    }

    pub(crate) fn scalar(&self) -> &Scalar<Secp256k1> {
        &self.0
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// A secp256k1 public key. Never the point at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(Point<Secp256k1>);

impl PublicKey {
    /// Accepts SEC1 compressed, uncompressed or hybrid encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        Self::from_point(Point::from_bytes(bytes)?)
    }

    /// Like [`PublicKey::from_bytes`] but also accepts raw coordinate
    /// layouts, see [`Point::from_key_material`].
    pub fn from_key_material(bytes: &[u8]) -> Result<Self, EccError> {
        Self::from_point(Point::from_key_material(bytes)?)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        Self::from_bytes(&hex::decode(hex_str.trim())?)
    }

    pub fn from_point(point: Point<Secp256k1>) -> Result<Self, EccError> {
        if point.is_identity() {
            return Err(EccError::InvalidEncoding(
                "public key is the point at infinity",
            ));
        }
        Ok(Self(point))
    }

    /// Compressed SEC1 encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes(true)
    }

    pub fn to_uncompressed_bytes(&self) -> Vec<u8> {
        self.0.to_bytes(false)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn as_point(&self) -> &Point<Secp256k1> {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serdect::slice::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// An ECDSA signature, `r || s` with both halves in `[1, n - 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: Scalar<Secp256k1>,
    s: Scalar<Secp256k1>,
}

impl Signature {
    pub(crate) fn from_scalars(r: Scalar<Secp256k1>, s: Scalar<Secp256k1>) -> Self {
        Self { r, s }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(EccError::InvalidEncoding("signature must be 64 bytes"));
        }
        let r = Scalar::from_be_bytes_checked(&bytes[..32])
            .map_err(|_| EccError::InvalidEncoding("signature r is out of range"))?;
        let s = Scalar::from_be_bytes_checked(&bytes[32..])
            .map_err(|_| EccError::InvalidEncoding("signature s is out of range"))?;
        Ok(Self { r, s })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        Self::from_bytes(&hex::decode(hex_str.trim())?)
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&self.r.to_be_bytes());
        bytes[32..].copy_from_slice(&self.s.to_be_bytes());
        bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn r(&self) -> &Scalar<Secp256k1> {
        &self.r
    }

    pub fn s(&self) -> &Scalar<Secp256k1> {
        &self.s
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serdect::slice::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}
